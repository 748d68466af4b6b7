mod log_level;

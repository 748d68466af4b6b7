use crate::ServerAddress;

use googletest::assert_that;
use googletest::prelude::eq;

#[test]
fn given_host_and_port_when_new_then_url_has_trailing_slash() {
    let address = ServerAddress::new("127.0.0.1", 8080);

    assert_that!(address.url(), eq("http://127.0.0.1:8080/"));
    assert_that!(address.host(), eq("127.0.0.1"));
    assert_that!(address.port(), eq(8080));
}

#[test]
fn given_ipv6_host_when_new_then_host_bracketed() {
    let address = ServerAddress::new("::1", 9000);

    assert_that!(address.url(), eq("http://[::1]:9000/"));
}

#[test]
fn given_path_with_or_without_slash_when_join_then_single_separator() {
    let address = ServerAddress::new("localhost", 1234);

    assert_that!(
        address.join("bulk_docs"),
        eq("http://localhost:1234/bulk_docs")
    );
    assert_that!(address.join("/ready"), eq("http://localhost:1234/ready"));
}

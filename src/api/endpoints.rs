pub fn domains_endpoint() -> &'static str {
    "/domains"
}

pub fn accounts_endpoint() -> &'static str {
    "/accounts"
}

pub fn token_endpoint() -> &'static str {
    "/token"
}

pub fn messages_endpoint() -> &'static str {
    "/messages"
}

pub fn message_endpoint(id: &str) -> String {
    format!("/messages/{id}")
}

pub const ECHO_PREFIX: &str = "You said: ";

/// Reply for the echo endpoint. Pure; the same message always yields the same reply.
pub fn echo_reply(user_msg: &str) -> String {
    format!("{ECHO_PREFIX}{user_msg}")
}

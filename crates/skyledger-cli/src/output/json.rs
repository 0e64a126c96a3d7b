use std::io;

use serde::Serialize;
use skyledger_client::contracts::envelope::failure_from_error;
use skyledger_client::{ClientError, SuccessEnvelope};

/// Success output is the envelope exactly as the client built it.
pub fn render_success_json(success: &SuccessEnvelope) -> io::Result<String> {
    serialize_json_pretty(success)
}

pub fn render_error_json(error: &ClientError) -> io::Result<String> {
    serialize_json_pretty(&failure_from_error(error))
}

fn serialize_json_pretty<T>(value: &T) -> io::Result<String>
where
    T: Serialize,
{
    serde_json::to_string_pretty(value).map_err(io::Error::other)
}

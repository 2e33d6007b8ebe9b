/// Undecoded response body of one successful transport attempt
pub type RawPayload = String;

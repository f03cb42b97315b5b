use crate::decode::EntryReader;
use crate::error::DecodeError;
use crate::keys;
use crate::named_list::{NamedList, Value};

/// The `responseHeader` section.
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseHeader {
    status: i64,
    q_time: Option<i64>,
    params: Option<NamedList>,
    partial_results: bool,
}

impl ResponseHeader {
    /// Server status code; `0` means success.
    #[must_use]
    pub fn status(&self) -> i64 {
        self.status
    }

    /// Query time in milliseconds.
    #[must_use]
    pub fn q_time(&self) -> Option<i64> {
        self.q_time
    }

    /// Echoed request parameters, when the request asked for them.
    #[must_use]
    pub fn params(&self) -> Option<&NamedList> {
        self.params.as_ref()
    }

    /// First echoed value of request parameter `name`.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        match self.params.as_ref()?.get(name)? {
            Value::List(items) => items.first().and_then(Value::as_str),
            value => value.as_str(),
        }
    }

    /// Whether the server stopped early (time allowed, shard failures).
    #[must_use]
    pub fn partial_results(&self) -> bool {
        self.partial_results
    }
}

pub(crate) fn decode_header(section: &NamedList) -> Result<ResponseHeader, DecodeError> {
    let reader = EntryReader::new(keys::RESPONSE_HEADER, keys::RESPONSE_HEADER, section);
    let params = match reader.get(keys::PARAMS) {
        None => None,
        Some(Value::Map(params)) => Some(params.clone()),
        Some(other) => return Err(reader.invalid(keys::PARAMS, "named list", other)),
    };
    Ok(ResponseHeader {
        status: reader.i64(keys::STATUS)?,
        q_time: reader.opt_i64(keys::QTIME)?,
        params,
        partial_results: reader.opt_bool(keys::PARTIAL_RESULTS)?.unwrap_or(false),
    })
}

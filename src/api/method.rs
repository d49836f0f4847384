use strum::{Display, EnumIter, EnumString};

/// The HTTP verbs the API is reached through.
///
/// Parsing is an exact match against the uppercase name, so `"put"` or a
/// verb with stray whitespace is rejected rather than silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum ApiMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl ApiMethod {
    /// GET requests never carry a body; a body given to GET is sent as the
    /// query string instead (see [`super::RequestBody::to_query`]).
    pub fn allows_body(self) -> bool {
        !matches!(self, Self::Get)
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl From<ApiMethod> for reqwest::Method {
    fn from(method: ApiMethod) -> Self {
        method.to_reqwest()
    }
}

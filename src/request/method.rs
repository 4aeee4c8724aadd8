use std::str::FromStr;

use reqwest::Method;

use crate::error::Error;

/// The fixed set of HTTP methods a template may issue.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl RequestMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "get",
            RequestMethod::Post => "post",
            RequestMethod::Put => "put",
            RequestMethod::Delete => "delete",
        }
    }

    pub fn to_method(self) -> Method {
        match self {
            RequestMethod::Get => Method::GET,
            RequestMethod::Post => Method::POST,
            RequestMethod::Put => Method::PUT,
            RequestMethod::Delete => Method::DELETE,
        }
    }
}

impl FromStr for RequestMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "get" => Ok(RequestMethod::Get),
            "post" => Ok(RequestMethod::Post),
            "put" => Ok(RequestMethod::Put),
            "delete" => Ok(RequestMethod::Delete),
            _ => Err(Error::InvalidMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_methods() {
        assert_eq!("get".parse::<RequestMethod>().unwrap(), RequestMethod::Get);
        assert_eq!("POST".parse::<RequestMethod>().unwrap(), RequestMethod::Post);
        assert_eq!("Put".parse::<RequestMethod>().unwrap(), RequestMethod::Put);
        assert_eq!("delete".parse::<RequestMethod>().unwrap(), RequestMethod::Delete);
    }

    #[test]
    fn rejects_methods_outside_the_fixed_set() {
        for bad in ["patch", "head", "", "gett"] {
            let err = bad.parse::<RequestMethod>().unwrap_err();
            assert!(matches!(err, Error::InvalidMethod(ref m) if m == bad), "{bad}");
        }
    }

    #[test]
    fn maps_to_reqwest_method() {
        assert_eq!(RequestMethod::Delete.to_method(), Method::DELETE);
        assert_eq!(RequestMethod::Get.to_method(), Method::GET);
    }
}

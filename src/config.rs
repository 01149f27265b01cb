use std::env;

pub const MONKEYTYPE_URL: &str = "https://api.monkeytype.com";

/// Process configuration, read once at startup.
///
/// `DATABASE_URL` and `PORT` are consumed directly by the binary; everything
/// that handlers need at request time lives here.
#[derive(Debug, Clone)]
pub struct Config {
	/// Secret for the Monkeytype passthrough. When unset, the proxy call is
	/// issued without an `Authorization` header.
	pub monkeytype_api_key: Option<String>,
	/// Base URL of the Monkeytype API, overridable for tests.
	pub monkeytype_url: String,
	/// Mounts the unauthenticated `/debug/posts` route. Never enable this in
	/// a real deployment.
	pub expose_debug_routes: bool,
}

impl Config {
	pub fn from_env() -> Self {
		Self {
			monkeytype_api_key: env::var("MONKEYTYPE_API_KEY").ok(),
			monkeytype_url: env::var("MONKEYTYPE_URL")
				.unwrap_or_else(|_| MONKEYTYPE_URL.to_string()),
			expose_debug_routes: env::var("EXPOSE_DEBUG_ROUTES")
				.is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true")),
		}
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			monkeytype_api_key: None,
			monkeytype_url: MONKEYTYPE_URL.to_string(),
			expose_debug_routes: false,
		}
	}
}

#[cfg(test)]
mod test {
	use super::Config;

	#[test]
	fn test_default_config_is_locked_down() {
		let config = Config::default();

		assert!(!config.expose_debug_routes);
		assert!(config.monkeytype_api_key.is_none());
		assert_eq!(config.monkeytype_url, super::MONKEYTYPE_URL);
	}
}

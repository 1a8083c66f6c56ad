//! Generative API settings and credential lookup.
//!
//! There is no config file: the endpoint and model have built-in defaults that
//! can be overridden when the bundle is built, and the API key is looked up on
//! every call.

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Where requests go and which model answers them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
	pub endpoint: String,
	pub model: String,
}

impl Default for GeneratorConfig {
	fn default() -> Self {
		Self {
			endpoint: DEFAULT_ENDPOINT.to_string(),
			model: DEFAULT_MODEL.to_string(),
		}
	}
}

impl GeneratorConfig {
	/// Defaults, overridden by `GEMINI_ENDPOINT` / `GEMINI_MODEL` at build time.
	pub fn from_build_env() -> Self {
		let mut config = Self::default();
		if let Some(endpoint) = non_blank(option_env!("GEMINI_ENDPOINT")) {
			config.endpoint = endpoint.trim_end_matches('/').to_string();
		}
		if let Some(model) = non_blank(option_env!("GEMINI_MODEL")) {
			config.model = model.to_string();
		}
		config
	}

	pub fn generate_url(&self) -> String {
		format!("{}/models/{}:generateContent", self.endpoint, self.model)
	}
}

/// Supplies the API key at call time. `None` means the call must not be made.
pub trait CredentialSource {
	fn api_key(&self) -> Option<String>;
}

/// Reads `window.API_KEY` from the hosting page, then the `API_KEY` or
/// `GEMINI_API_KEY` variable baked in at build time.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostEnvironment;

impl CredentialSource for HostEnvironment {
	fn api_key(&self) -> Option<String> {
		page_global("API_KEY")
			.filter(|key| !key.trim().is_empty())
			.or_else(|| {
				non_blank(option_env!("API_KEY"))
					.or_else(|| non_blank(option_env!("GEMINI_API_KEY")))
					.map(str::to_string)
			})
	}
}

/// A fixed key for tests.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct StaticKey(pub Option<String>);

#[cfg(test)]
impl CredentialSource for StaticKey {
	fn api_key(&self) -> Option<String> {
		self.0.clone().filter(|key| !key.trim().is_empty())
	}
}

fn non_blank(value: Option<&'static str>) -> Option<&'static str> {
	value.filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn page_global(name: &str) -> Option<String> {
	use wasm_bindgen::JsValue;

	let window = web_sys::window()?;
	let target: &JsValue = window.as_ref();
	js_sys::Reflect::get(target, &JsValue::from_str(name))
		.ok()?
		.as_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn page_global(_name: &str) -> Option<String> {
	None
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_url_targets_flash_model() {
		let config = GeneratorConfig::default();
		assert_eq!(
			config.generate_url(),
			"https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
		);
	}

	#[test]
	fn blank_static_key_counts_as_missing() {
		assert_eq!(StaticKey(Some("  ".into())).api_key(), None);
		assert_eq!(StaticKey(None).api_key(), None);
		assert_eq!(StaticKey(Some("k".into())).api_key().as_deref(), Some("k"));
	}
}

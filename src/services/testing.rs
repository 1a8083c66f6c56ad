use std::cell::RefCell;

use super::error::ServiceError;
use super::gemini::{GenerateRequest, GenerativeBackend};

/// In-memory backend that records requests and replays a fixed outcome.
pub struct ScriptedBackend {
	reply: Box<dyn Fn() -> Result<String, ServiceError>>,
	requests: RefCell<Vec<GenerateRequest>>,
}

impl ScriptedBackend {
	pub fn replying(text: &str) -> Self {
		let text = text.to_string();
		Self {
			reply: Box::new(move || Ok(text.clone())),
			requests: RefCell::default(),
		}
	}

	pub fn failing(error: impl Fn() -> ServiceError + 'static) -> Self {
		Self {
			reply: Box::new(move || Err(error())),
			requests: RefCell::default(),
		}
	}

	pub fn calls(&self) -> usize {
		self.requests.borrow().len()
	}

	pub fn last_request(&self) -> Option<GenerateRequest> {
		self.requests.borrow().last().cloned()
	}
}

impl GenerativeBackend for ScriptedBackend {
	async fn generate(&self, request: GenerateRequest) -> Result<String, ServiceError> {
		self.requests.borrow_mut().push(request);
		(self.reply)()
	}
}

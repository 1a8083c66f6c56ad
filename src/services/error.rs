use thiserror::Error;

/// Failures of the synthesis and expansion flows.
#[derive(Debug, Error)]
pub enum ServiceError {
	#[error("Please select at least one concept or provide context.")]
	EmptyRequest,

	#[error("Enter a term to research.")]
	EmptyTerm,

	#[error("\"{name}\" is already in the knowledge base.")]
	DuplicateName { name: String },

	#[error("API key is missing. Set API_KEY in the hosting environment.")]
	MissingCredential,

	#[error("request failed: {0}")]
	Http(#[from] reqwest::Error),

	#[error("generative API error ({status}): {message}")]
	Remote { status: u16, message: String },

	#[error("the model returned no text")]
	EmptyResponse,

	#[error("could not parse the model output: {0}")]
	Malformed(#[from] serde_json::Error),
}

impl ServiceError {
	/// Rejected before anything went over the network.
	pub fn is_local(&self) -> bool {
		matches!(
			self,
			ServiceError::EmptyRequest
				| ServiceError::EmptyTerm
				| ServiceError::DuplicateName { .. }
				| ServiceError::MissingCredential
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn local_and_remote_classes() {
		assert!(ServiceError::EmptyRequest.is_local());
		assert!(ServiceError::MissingCredential.is_local());
		assert!(
			ServiceError::DuplicateName {
				name: "Glitch Art".into()
			}
			.is_local()
		);
		assert!(!ServiceError::EmptyResponse.is_local());
		assert!(
			!ServiceError::Remote {
				status: 500,
				message: "boom".into()
			}
			.is_local()
		);
	}

	#[test]
	fn messages_are_user_facing() {
		let err = ServiceError::DuplicateName {
			name: "Glitch Art".into(),
		};
		assert_eq!(err.to_string(), "\"Glitch Art\" is already in the knowledge base.");
	}
}

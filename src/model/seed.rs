//! Hand-authored starting knowledge base.
//!
//! Several `related_ids` intentionally point at concepts that are not part of
//! the seed (`noise`, `java`, `hydra`, ...). They become live links once a
//! concept with that id is added.

use super::concept::{Category, Concept};

pub fn initial_concepts() -> Vec<Concept> {
	vec![
		// aesthetics & movements
		Concept::new("glitch-art", "Glitch Art", Category::Movement)
			.with_description(
				"The practice of using digital or analog errors for aesthetic purposes by corrupting digital data or physically manipulating electronic devices.",
			)
			.related_to(["databending", "noise", "generative-art"])
			.tagged(["chaos", "distortion", "digital-decay"]),
		Concept::new("generative-art", "Generative Art", Category::Movement)
			.with_description(
				"Art that in whole or in part has been created with the use of an autonomous system.",
			)
			.related_to(["algorithmic-comp", "chaos-theory", "p5js", "processing"])
			.tagged(["autonomous", "system", "randomness"]),
		Concept::new("minimalism", "Minimalism", Category::Aesthetic)
			.with_description(
				"Design or style in which the simplest and fewest elements are used to create the maximum effect.",
			)
			.related_to(["generative-art", "ryoji-ikeda-style"])
			.tagged(["clean", "simple", "reduction"]),
		Concept::new("cyberpunk", "Cyberpunk", Category::Aesthetic)
			.with_description(
				"A subgenre of science fiction in a dystopian futuristic setting that tends to focus on a \"combination of low-life and high tech\".",
			)
			.related_to(["glitch-art", "neon-noir"])
			.tagged(["dystopia", "neon", "high-tech"]),
		Concept::new("biomorphism", "Biomorphism", Category::Aesthetic)
			.with_description(
				"Artistic design elements on naturally occurring patterns or shapes reminiscent of nature and living organisms.",
			)
			.related_to(["reaction-diffusion", "flocking", "particle-systems"])
			.tagged(["nature", "organic", "evolution"]),
		// concepts & algorithms
		Concept::new("reaction-diffusion", "Reaction Diffusion", Category::Concept)
			.with_description(
				"A mathematical model which explains how the concentration of one or more substances changes under the influence of two processes: local chemical reactions and diffusion.",
			)
			.related_to(["biomorphism", "glsl", "simulation"])
			.tagged(["math", "pattern", "nature"]),
		Concept::new("fft", "FFT (Fast Fourier Transform)", Category::Concept)
			.with_description(
				"An algorithm that computes the discrete Fourier transform of a sequence. Essential for audio visualization.",
			)
			.related_to(["audio-reactive", "supercollider", "touchdesigner"])
			.tagged(["audio", "math", "spectrum"]),
		Concept::new("flocking", "Flocking (Boids)", Category::Concept)
			.with_description(
				"The simulation of the flocking behavior of birds. Coined by Craig Reynolds with three simple rules: separation, alignment, and cohesion.",
			)
			.related_to(["particle-systems", "generative-art", "agent-based"])
			.tagged(["simulation", "emergence", "agents"]),
		Concept::new("raymarching", "Raymarching", Category::Concept)
			.with_description(
				"A technique for rendering 3D scenes where rays are marched iteratively until they hit a surface defined by a Signed Distance Function (SDF).",
			)
			.related_to(["glsl", "shaders", "fractals"])
			.tagged(["3d", "rendering", "math"]),
		Concept::new("markov-chain", "Markov Chain", Category::Concept)
			.with_description(
				"A stochastic model describing a sequence of possible events in which the probability of each event depends only on the state attained in the previous event.",
			)
			.related_to(["algorithmic-comp", "generative-text", "electronic-music"])
			.tagged(["probability", "sequence", "music"]),
		// technology & tools
		Concept::new("processing", "Processing", Category::Tool)
			.with_description(
				"A flexible software sketchbook and a language for learning how to code within the context of the visual arts.",
			)
			.related_to(["java", "p5js", "generative-art"])
			.tagged(["code", "visual", "education"]),
		Concept::new("p5js", "p5.js", Category::Tool)
			.with_description(
				"A JavaScript library for creative coding, with a focus on making coding accessible and inclusive.",
			)
			.related_to(["processing", "webgl", "web-audio"])
			.tagged(["javascript", "web", "canvas"]),
		Concept::new("glsl", "GLSL (Shaders)", Category::Technology)
			.with_description(
				"OpenGL Shading Language. Used to write shaders that run on the GPU for high-performance graphics and computation.",
			)
			.related_to(["raymarching", "webgl", "touchdesigner"])
			.tagged(["gpu", "graphics", "performance"]),
		Concept::new("supercollider", "SuperCollider", Category::Tool)
			.with_description(
				"An environment and programming language for real-time audio synthesis and algorithmic composition.",
			)
			.related_to(["algorithmic-comp", "electronic-music", "osc"])
			.tagged(["audio", "synthesis", "code"]),
		Concept::new("touchdesigner", "TouchDesigner", Category::Tool)
			.with_description(
				"A node-based visual programming language for real-time interactive multimedia content.",
			)
			.related_to(["glsl", "projection-mapping", "osc"])
			.tagged(["nodes", "visual", "realtime"]),
		Concept::new("max-msp", "Max/MSP", Category::Tool)
			.with_description(
				"A visual programming language for music and multimedia developed by Cycling '74.",
			)
			.related_to(["pd", "electronic-music", "jitter"])
			.tagged(["nodes", "music", "interaction"]),
		// fields
		Concept::new("algorithmic-comp", "Algorithmic Composition", Category::Concept)
			.with_description("The technique of using algorithms to create music.")
			.related_to(["supercollider", "generative-art", "markov-chain"])
			.tagged(["music", "math", "composition"]),
		Concept::new("live-coding", "Live Coding", Category::Movement)
			.with_description(
				"A performing arts form and a creativity technique centred upon the use of improvised interactive programming.",
			)
			.related_to(["tidalcycles", "sonic-pi", "hydra"])
			.tagged(["performance", "code", "realtime"]),
	]
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	#[test]
	fn seed_ids_are_unique() {
		let concepts = initial_concepts();
		let ids: HashSet<_> = concepts.iter().map(|c| c.id.as_str()).collect();
		assert_eq!(ids.len(), concepts.len());
		assert_eq!(concepts.len(), 18);
	}

	#[test]
	fn seed_contains_soft_links() {
		let concepts = initial_concepts();
		let ids: HashSet<_> = concepts.iter().map(|c| c.id.as_str()).collect();
		let dangling = concepts
			.iter()
			.flat_map(|c| c.related_ids.iter())
			.filter(|id| !ids.contains(id.as_str()))
			.count();
		assert!(dangling > 0);
	}
}

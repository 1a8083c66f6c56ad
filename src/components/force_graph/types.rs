use std::collections::HashMap;

use log::debug;

use crate::model::Concept;

/// One node per concept, in store order.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkNode {
	pub concept: Concept,
}

/// Directed `source -> target` link between node positions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NetworkLink {
	pub source: usize,
	pub target: usize,
}

/// Nodes and resolvable links derived from a concept snapshot.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkGraph {
	pub nodes: Vec<NetworkNode>,
	pub links: Vec<NetworkLink>,
}

impl NetworkGraph {
	/// Builds the graph, dropping `related_ids` that do not name a concept in
	/// `concepts`.
	pub fn build<'a>(concepts: impl IntoIterator<Item = &'a Concept>) -> Self {
		let nodes: Vec<NetworkNode> = concepts
			.into_iter()
			.map(|c| NetworkNode { concept: c.clone() })
			.collect();
		let index: HashMap<&str, usize> = nodes
			.iter()
			.enumerate()
			.map(|(i, n)| (n.concept.id.as_str(), i))
			.collect();

		let mut links = Vec::new();
		let mut dangling = 0usize;
		for (source, node) in nodes.iter().enumerate() {
			for target_id in &node.concept.related_ids {
				match index.get(target_id.as_str()) {
					Some(&target) => links.push(NetworkLink { source, target }),
					None => dangling += 1,
				}
			}
		}
		if dangling > 0 {
			debug!("network: {} links, {} soft links skipped", links.len(), dangling);
		}

		Self { nodes, links }
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn node_id(&self, idx: usize) -> Option<&str> {
		self.nodes.get(idx).map(|n| n.concept.id.as_str())
	}

	/// Nodes linked to `idx` in either direction.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		self.links.iter().filter_map(move |link| {
			if link.source == idx {
				Some(link.target)
			} else if link.target == idx {
				Some(link.source)
			} else {
				None
			}
		})
	}
}

use crate::Document;
use crate::FocusTree;
use crate::NodeId;
use crate::parse_markup;

pub const TRAP_MARKUP: &str = r##"
<div id="container">
	<button id="first">First</button>
	<input id="middle" type="text">
	<a href="#" id="last">Last</a>
</div>
<button id="outside">Outside</button>
"##;

pub const SHADOW_MARKUP: &str = r##"
<div id="container">
	<button id="before">Before</button>
	<shadow-el id="host">
		<template shadowrootmode="open">
			<button id="shadow-first">First</button>
			<input id="shadow-middle" type="text">
			<a href="#" id="shadow-last">Last</a>
		</template>
	</shadow-el>
	<button id="after">After</button>
</div>
"##;

pub const SLOT_MARKUP: &str = r##"
<slot-el id="container">
	<template shadowrootmode="open">
		<header><slot name="title"></slot></header>
		<slot></slot>
	</template>
	<button id="default-one">One</button>
	<button id="titled" slot="title">Title</button>
	<button id="default-two">Two</button>
</slot-el>
"##;

pub fn document(markup: &str) -> Document {
	parse_markup(markup).unwrap_or_else(|e| panic!("fixture markup should parse: {e}"))
}

pub fn by_id(document: &Document, id: &str) -> NodeId {
	document
		.get_element_by_id(id)
		.unwrap_or_else(|| panic!("fixture should contain #{id}"))
}

/// The `id` attributes of `nodes`, for readable assertions.
pub fn ids(document: &Document, nodes: &[NodeId]) -> Vec<String> {
	nodes
		.iter()
		.map(|node| {
			document
				.attribute(*node, "id")
				.map_or_else(|| document.describe(*node), ToString::to_string)
		})
		.collect()
}

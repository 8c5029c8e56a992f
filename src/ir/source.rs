// Zero-indexed location in a source text, in lines and characters.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
	pub line: u32,
	pub character: u32,
}

// Half-open span: the end position is exclusive.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Range {
	pub start: Position,
	pub end: Position,
}

impl Range {
	pub fn new(start: Position, end: Position) -> Self { Self { start, end } }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Diagnostic {
	pub range: Range,
	pub message: String,
}

// Append-only sink of diagnostics, in emission order.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
	pub fn new() -> Self { Self(Vec::new()) }

	pub fn report(&mut self, range: Range, message: impl Into<String>) {
		self.0.push(Diagnostic { range, message: message.into() })
	}

	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	pub fn len(&self) -> usize { self.0.len() }
}

impl IntoIterator for Diagnostics {
	type Item = Diagnostic;
	type IntoIter = std::vec::IntoIter<Diagnostic>;
	fn into_iter(self) -> Self::IntoIter { self.0.into_iter() }
}

impl<'a> IntoIterator for &'a Diagnostics {
	type Item = &'a Diagnostic;
	type IntoIter = std::slice::Iter<'a, Diagnostic>;
	fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

use crate::{
	common::{Binder, Label, Name},
	ir::source::Range,
};

#[derive(Debug, Clone)]
pub struct Expression {
	pub range: Range,
	pub preterm: Preterm,
}

// A binder occurrence: the name token's span, or an empty span if the name is absent.
#[derive(Debug, Clone, Copy)]
pub struct ParsedLabel {
	pub range: Range,
	pub label: Label,
}

#[derive(Debug, Clone)]
pub enum Preterm {
	// Variables.
	Var(Name),

	Let { ty: Box<Expression>, argument: Box<Expression>, tail: Binder<ParsedLabel, Box<Expression>> },

	// The type of types.
	Type,

	// Dependent functions.
	Func { param: Box<Expression>, result: Binder<ParsedLabel, Box<Expression>> },
	FuncOf { result: Binder<ParsedLabel, Box<Expression>> },
	Call { operator: Box<Expression>, operand: Box<Expression> },

	// The closed modality.
	Closed(Box<Expression>),
	Close(Box<Expression>),
	Open(Box<Expression>),

	Hole,
}

impl Preterm {
	pub fn at(self, range: Range) -> Expression { Expression { range, preterm: self } }
}

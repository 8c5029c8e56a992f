use crate::common::{Binder, Index, Label, Name};

#[derive(Clone, Debug)]
pub enum Term {
	// Variables.
	Var(Option<Name>, Index),

	// Let-expressions.
	Let { argument: Box<Self>, tail: Binder<Label, Box<Self>> },

	// The type of types.
	Type,

	// Dependent functions.
	Func { param: Box<Self>, result: Binder<Label, Box<Self>> },
	FuncOf { result: Binder<Label, Box<Self>> },
	Call { operator: Box<Self>, operand: Box<Self> },

	// The closed modality.
	Closed(Box<Self>),
	Close(Box<Self>),
	Open(Box<Self>),

	Hole,
}

use std::{cell::RefCell, rc::Rc};

use crate::{
	common::{Index, Label, Level, Name},
	frontend::evaluate::Evaluate as _,
	ir::syntax::Term,
};

#[derive(Clone, Debug)]
pub enum Value {
	// Neutrals.
	Var(Option<Name>, Level),
	Call { operator: Rc<Self>, operand: Rc<Thunk> },

	// The type of types.
	Type,

	// Dependent functions.
	Func { param: Rc<Thunk>, result: Rc<Closure> },
	FuncOf { result: Rc<Closure> },

	// The closed modality.
	Closed(Rc<Thunk>),
	Close(Rc<Thunk>),
	Open(Rc<Thunk>),

	Hole,
}

#[derive(Clone, Debug)]
pub struct Closure {
	pub environment: Environment,
	pub parameter: Label,
	pub body: Term,
}

impl Closure {
	pub fn new(environment: Environment, parameter: Label, body: Term) -> Self {
		Self { environment, parameter, body }
	}
}

// A memoized suspension: evaluated at most once, on first demand.
#[derive(Debug)]
pub struct Thunk(RefCell<ThunkState>);

#[derive(Debug)]
enum ThunkState {
	Suspended { environment: Environment, term: Term },
	Forced(Rc<Value>),
}

impl Thunk {
	pub fn new(environment: Environment, term: Term) -> Self {
		Self(RefCell::new(ThunkState::Suspended { environment, term }))
	}

	pub fn force(&self) -> Rc<Value> {
		let (environment, term) = match &*self.0.borrow() {
			ThunkState::Forced(value) => return value.clone(),
			ThunkState::Suspended { environment, term } => (environment.clone(), term.clone()),
		};
		let value = Rc::new(term.evaluate_in(&environment));
		*self.0.borrow_mut() = ThunkState::Forced(value.clone());
		value
	}
}

impl From<Value> for Thunk {
	fn from(value: Value) -> Self { Self(RefCell::new(ThunkState::Forced(value.into()))) }
}

impl From<Rc<Value>> for Thunk {
	fn from(value: Rc<Value>) -> Self { Self(RefCell::new(ThunkState::Forced(value))) }
}

#[derive(Clone, Debug)]
pub struct Environment(pub Vec<Rc<Thunk>>);

impl Environment {
	pub fn new() -> Self { Self(Vec::new()) }

	pub fn lookup(&self, Index(i): Index) -> Rc<Thunk> {
		let Some(thunk) = self.0.get(self.0.len() - 1 - i) else { panic!() };
		thunk.clone()
	}

	#[must_use]
	pub fn extend(&self, value: Rc<Thunk>) -> Self {
		let mut environment = self.clone();
		environment.0.push(value);
		environment
	}

	pub fn level(&self) -> Level { Level(self.0.len()) }
}

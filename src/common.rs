use lasso::Spur;

// de Bruijn index: zero is the newest bound parameter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Index(pub usize);

// de Bruijn level: zero is the oldest bound parameter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Level(pub usize);

impl std::ops::Add<usize> for Level {
	type Output = Self;
	fn add(self, rhs: usize) -> Self::Output {
		let Self(level) = self;
		Self(level + rhs)
	}
}

pub type Name = Spur;
pub type Label = Option<Name>;

#[derive(Clone, Debug)]
pub struct Binder<P, T> {
	pub parameter: P,
	pub body: T,
}

impl<P, T> Binder<P, T> {
	pub fn new(parameter: P, body: T) -> Self { Self { parameter, body } }
}

pub fn bind<P, T>(parameter: P, body: impl Into<T>) -> Binder<P, T> {
	Binder::new(parameter, body.into())
}

use crate::{
	common::Level,
	frontend::evaluate::{EvaluateAuto as _, EvaluateWith as _},
	ir::semantics::Value,
};

pub trait Conversion<T> {
	/// Decides whether two values are judgementally equal.
	fn can_convert(self, left: &T, right: &T) -> bool;
}

impl Conversion<Value> for Level {
	fn can_convert(self, left: &Value, right: &Value) -> bool {
		use Value::*;
		match (left, right) {
			// Holes convert with everything, suppressing cascades from an already-reported error.
			(Hole, _) | (_, Hole) => true,

			// Neutrals.
			(Var(_, left), Var(_, right)) => left == right,
			(
				Call { operator: left_operator, operand: left_operand },
				Call { operator: right_operator, operand: right_operand },
			) =>
				self.can_convert(&**left_operator, right_operator)
					&& self.can_convert(&*left_operand.force(), &*right_operand.force()),

			// The type of types.
			(Type, Type) => true,

			// Dependent functions.
			(
				Func { param: left_param, result: left_result },
				Func { param: right_param, result: right_result },
			) =>
				self.can_convert(&*left_param.force(), &*right_param.force())
					&& (self + 1).can_convert(
						&left_result.evaluate_with(left_param.clone()),
						&right_result.evaluate_with(left_param.clone()),
					),
			(FuncOf { result: left }, FuncOf { result: right }) =>
				(self + 1).can_convert(&left.evaluate_auto(self), &right.evaluate_auto(self)),

			// The closed modality.
			(Closed(left), Closed(right)) | (Close(left), Close(right)) | (Open(left), Open(right)) =>
				self.can_convert(&*left.force(), &*right.force()),

			// Inconvertible.
			_ => false,
		}
	}
}

use lasso::{Rodeo, RodeoResolver};

use crate::{
	common::bind,
	ir::{
		presyntax::{Expression, ParsedLabel, Preterm},
		source::{Diagnostics, Position, Range},
	},
};

/// Parses an expression from a source string, recovering from malformed input.
pub fn parse(source: &str) -> (Expression, RodeoResolver, Diagnostics) {
	let mut parser = Parser {
		source,
		cursor: 0,
		position: Position { line: 0, character: 0 },
		interner: Rodeo::new(),
		diagnostics: Diagnostics::new(),
	};
	let expression = parser.expression();
	parser.skip_whitespace();
	if parser.peek().is_some() {
		parser.report_here("expected end of file");
	}
	(expression, parser.interner.into_resolver(), parser.diagnostics)
}

struct Parser<'s> {
	source: &'s str,
	cursor: usize,
	position: Position,
	interner: Rodeo,
	diagnostics: Diagnostics,
}

impl<'s> Parser<'s> {
	fn keyword(word: &str) -> bool {
		matches!(word, "Type" | "Func" | "Closed" | "close" | "open" | "let")
	}

	fn peek(&self) -> Option<char> { self.source[self.cursor..].chars().next() }

	fn pop(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.cursor += c.len_utf8();
		match c {
			'\n' => {
				self.position.line += 1;
				self.position.character = 0;
			}
			// A carriage return and an immediately following line feed count as one break.
			'\r' => {
				if self.peek() == Some('\n') {
					self.cursor += 1;
				}
				self.position.line += 1;
				self.position.character = 0;
			}
			_ => self.position.character += 1,
		}
		Some(c)
	}

	fn skip_whitespace(&mut self) {
		loop {
			match self.peek() {
				Some(' ' | '\t' | '\n' | '\r') => {
					self.pop();
				}
				Some('#') => {
					while let Some(c) = self.peek() {
						if c == '\n' || c == '\r' {
							break;
						}
						self.pop();
					}
				}
				_ => break,
			}
		}
	}

	// Scans an identifier or keyword; the caller has checked the first character.
	fn word(&mut self) -> &'s str {
		let start = self.cursor;
		while let Some('a'..='z' | 'A'..='Z' | '0'..='9' | '_') = self.peek() {
			self.pop();
		}
		&self.source[start..self.cursor]
	}

	fn at(&self, start: Position) -> Range { Range::new(start, self.position) }

	fn span_here(&self) -> Range {
		Range::new(
			self.position,
			Position { line: self.position.line, character: self.position.character + 1 },
		)
	}

	fn report_here(&mut self, message: impl Into<String>) {
		let range = self.span_here();
		self.diagnostics.report(range, message);
	}

	// Consumes the expected token, or reports without consuming so that parsing can resume on it.
	fn expect(&mut self, token: &str) {
		self.skip_whitespace();
		if self.source[self.cursor..].starts_with(token) {
			for _ in token.chars() {
				self.pop();
			}
		} else {
			let range = self.span_here();
			self.diagnostics.report(range, format!("expected '{token}'"));
		}
	}

	// Parses a binder name; a missing name is reported and left empty.
	fn binding(&mut self) -> ParsedLabel {
		self.skip_whitespace();
		let start = self.position;
		if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
			let word = self.word();
			ParsedLabel { range: self.at(start), label: Some(self.interner.get_or_intern(word)) }
		} else {
			self.report_here("expected name");
			ParsedLabel { range: Range::new(start, start), label: None }
		}
	}

	fn expression(&mut self) -> Expression {
		self.skip_whitespace();
		let start = self.position;
		let mut expression = match self.peek() {
			None => {
				self.report_here("unexpected end of file");
				Preterm::Hole.at(self.at(start))
			}
			Some('(') => {
				self.pop();
				let expression = self.expression();
				self.expect(")");
				expression
			}
			Some('{') => {
				self.pop();
				let parameter = self.binding();
				self.expect("->");
				let body = self.expression();
				self.expect("}");
				Preterm::FuncOf { result: bind(parameter, body) }.at(self.at(start))
			}
			Some(c) if c.is_ascii_alphabetic() => {
				let word = self.word();
				match word {
					"Type" => Preterm::Type.at(self.at(start)),
					"Func" => self.func(start),
					"Closed" => Preterm::Closed(self.braced().into()).at(self.at(start)),
					"close" => Preterm::Close(self.braced().into()).at(self.at(start)),
					"open" => Preterm::Open(self.braced().into()).at(self.at(start)),
					"let" => self.lets(start),
					_ => Preterm::Var(self.interner.get_or_intern(word)).at(self.at(start)),
				}
			}
			Some(_) => {
				self.report_here("unrecognized character");
				self.pop();
				Preterm::Hole.at(self.at(start))
			}
		};
		// Applications.
		loop {
			self.skip_whitespace();
			if self.peek() == Some('(') {
				self.pop();
				let operand = self.expression();
				self.expect(")");
				expression =
					Preterm::Call { operator: expression.into(), operand: operand.into() }.at(self.at(start));
			} else {
				break expression;
			}
		}
	}

	// The braced element of a modality form.
	fn braced(&mut self) -> Expression {
		self.expect("{");
		let element = self.expression();
		self.expect("}");
		element
	}

	// A function type after its keyword: the parameter may be named or bare.
	fn func(&mut self, start: Position) -> Expression {
		self.expect("(");
		let saved_cursor = self.cursor;
		let saved_position = self.position;
		self.skip_whitespace();
		let parameter_start = self.position;
		let parameter = if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
			let word = self.word();
			if Self::keyword(word) {
				// A keyword begins the parameter type itself, so back out of the name scan.
				self.cursor = saved_cursor;
				self.position = saved_position;
				ParsedLabel { range: Range::new(parameter_start, parameter_start), label: None }
			} else {
				let parameter =
					ParsedLabel { range: self.at(parameter_start), label: Some(self.interner.get_or_intern(word)) };
				self.expect(":");
				parameter
			}
		} else {
			ParsedLabel { range: Range::new(parameter_start, parameter_start), label: None }
		};
		let param = self.expression();
		self.expect(")");
		self.expect("->");
		let result = self.expression();
		Preterm::Func { param: param.into(), result: bind(parameter, result) }.at(self.at(start))
	}

	fn lets(&mut self, start: Position) -> Expression {
		let parameter = self.binding();
		self.expect(":");
		let ty = self.expression();
		self.expect("=");
		let argument = self.expression();
		self.expect(";");
		let tail = self.expression();
		Preterm::Let { ty: ty.into(), argument: argument.into(), tail: bind(parameter, tail) }
			.at(self.at(start))
	}
}

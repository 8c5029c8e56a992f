use crate::ir::source::Diagnostic;

/// Prints a diagnostic along with the offending source line and a caret underline.
pub fn report_diagnostic(source: &str, diagnostic: &Diagnostic) {
	const TAB_WIDTH: usize = 3;
	// SAFETY: Repeated spaces form a valid string.
	const TAB_REPLACEMENT: &str = unsafe { std::str::from_utf8_unchecked(&[b' '; TAB_WIDTH]) };

	let range = diagnostic.range;
	let line = source.split('\n').nth(range.start.line as usize).unwrap_or("");
	let start = range.start.character as usize;
	// A range that leaves its starting line is underlined to the end of that line.
	let end = if range.end.line == range.start.line {
		(range.end.character as usize).max(start + 1)
	} else {
		line.chars().count().max(start + 1)
	};

	println!("[{}:{}] error: {}", range.start.line + 1, start, diagnostic.message);

	let prefix = line.chars().take(start).collect::<String>().replace('\t', TAB_REPLACEMENT);
	let underlined = line.chars().take(end).skip(start).collect::<String>().replace('\t', TAB_REPLACEMENT);
	let visual_line = line.replace('\t', TAB_REPLACEMENT).trim_end().to_owned();
	let visual_offset = unicode_width::UnicodeWidthStr::width(prefix.as_str());
	let width = unicode_width::UnicodeWidthStr::width(underlined.as_str()).max(1);

	let displayed_line_number = (range.start.line + 1).to_string();
	let dummy_line_number = " ".repeat(displayed_line_number.len());
	println!("{} |", dummy_line_number);
	println!("{} | {}", displayed_line_number, visual_line);
	println!("{} | {}{}", dummy_line_number, " ".repeat(visual_offset), "^".repeat(width));
}

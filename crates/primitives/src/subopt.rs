use crate::error::OptionError;

/// Splits a sub-option string into `(key, value)` pairs.
///
/// The syntax is `key1=val1:key2=val2:flag`. A key without `=` yields `None`
/// as its value. Values containing `:` can be written as `key="a:b"` or with
/// an explicit byte length, `key=%3%a:b`. Empty segments are skipped, so an
/// empty string yields no pairs. `option` names the composite option in errors.
pub fn split_suboptions(option: &str, text: &str) -> Result<Vec<(String, Option<String>)>, OptionError> {
	let bytes = text.as_bytes();
	let mut pairs = Vec::new();
	let mut pos = 0;

	while pos < bytes.len() {
		let key_end = text[pos..].find([':', '=']).map_or(bytes.len(), |i| pos + i);
		let key = &text[pos..key_end];
		pos = key_end;

		if pos >= bytes.len() || bytes[pos] == b':' {
			if !key.is_empty() {
				pairs.push((key.to_string(), None));
			}
			pos += 1;
			continue;
		}

		// bytes[pos] == b'='
		pos += 1;
		if key.is_empty() {
			return Err(OptionError::invalid(option, format!("empty sub-option name in '{text}'")));
		}

		let (value, next) = match bytes.get(pos) {
			Some(b'"') => {
				let close = text[pos + 1..]
					.find('"')
					.map(|i| pos + 1 + i)
					.ok_or_else(|| OptionError::invalid(option, format!("unterminated quote in sub-option '{key}'")))?;
				(&text[pos + 1..close], close + 1)
			}
			Some(b'%') => {
				let len_end = text[pos + 1..]
					.find('%')
					.map(|i| pos + 1 + i)
					.ok_or_else(|| OptionError::invalid(option, format!("malformed length prefix in sub-option '{key}'")))?;
				let len: usize = text[pos + 1..len_end]
					.parse()
					.map_err(|_| OptionError::invalid(option, format!("malformed length prefix in sub-option '{key}'")))?;
				let start = len_end + 1;
				let end = start + len;
				if end > bytes.len() || !text.is_char_boundary(end) {
					return Err(OptionError::invalid(option, format!("length prefix of sub-option '{key}' exceeds its value")));
				}
				(&text[start..end], end)
			}
			_ => {
				let end = text[pos..].find(':').map_or(bytes.len(), |i| pos + i);
				(&text[pos..end], end)
			}
		};

		if next < bytes.len() && bytes[next] != b':' {
			return Err(OptionError::invalid(option, format!("unexpected text after the value of sub-option '{key}'")));
		}
		pairs.push((key.to_string(), Some(value.to_string())));
		pos = next + 1;
	}

	Ok(pairs)
}

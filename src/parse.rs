//! Infix boolean expression parsing and evaluation.
//!
//! Grammar: a variable is a single alphabetic letter; `~` is prefix NOT
//! (highest precedence), `.` (AND) and `^` (XOR) share the middle tier, `+`
//! (OR) binds loosest; parentheses group. Malformed input is never an error
//! condition here: validation returns `None` and evaluation degrades to
//! `false`, so interactive callers can treat "invalid" as just another value.

use std::collections::HashMap;

pub fn is_operator(c: char) -> bool {
    c == '.' || c == '+' || c == '~' || c == '^'
}

fn precedence(op: char) -> u8 {
    match op {
        '+' => 1,
        '.' | '^' => 2,
        '~' => 3,
        _ => 0,
    }
}

/// Collapses `~~x` to `x`, repeatedly, before validation.
pub fn collapse_double_negation(infix: &str) -> String {
    let mut result = infix.to_string();
    while let Some(pos) = result.find("~~") {
        result.replace_range(pos..pos + 2, "");
    }
    result
}

/// Strips whitespace and validates the expression structure.
///
/// Returns `None` on consecutive binary operators, adjacent operands,
/// unbalanced parentheses, or an operand immediately following `)`.
/// Characters outside the grammar are dropped.
pub fn clean(infix: &str) -> Option<String> {
    let mut cleaned = String::new();
    let mut last_was_operator = true;
    let mut paren_count: i32 = 0;

    for c in infix.chars() {
        if c.is_whitespace() {
            continue;
        }
        if c == '(' {
            paren_count += 1;
            cleaned.push(c);
            last_was_operator = true;
        } else if c == ')' {
            paren_count -= 1;
            if paren_count < 0 {
                return None;
            }
            cleaned.push(c);
            last_was_operator = false;
        } else if is_operator(c) {
            if last_was_operator && c != '~' {
                return None;
            }
            cleaned.push(c);
            last_was_operator = c != '~';
        } else if c.is_ascii_alphabetic() {
            if !last_was_operator {
                return None;
            }
            cleaned.push(c);
            last_was_operator = false;
        }
    }

    if paren_count == 0 {
        Some(cleaned)
    } else {
        None
    }
}

/// Converts an infix expression to postfix via shunting-yard.
///
/// Runs double-negation collapse and [`clean`] first; returns `None` if the
/// input is invalid.
pub fn to_postfix(infix: &str) -> Option<String> {
    let cleaned = clean(&collapse_double_negation(infix))?;
    if cleaned.is_empty() {
        return None;
    }

    let mut stack: Vec<char> = Vec::new();
    let mut postfix = String::new();
    let mut expect_operand = true;

    for c in cleaned.chars() {
        if c.is_ascii_alphabetic() {
            if !expect_operand {
                return None;
            }
            postfix.push(c);
            expect_operand = false;
        } else if c == '(' {
            stack.push(c);
            expect_operand = true;
        } else if c == ')' {
            loop {
                match stack.pop() {
                    Some('(') => break,
                    Some(op) => postfix.push(op),
                    None => return None,
                }
            }
            expect_operand = false;
        } else if is_operator(c) {
            if expect_operand && c != '~' {
                return None;
            }
            while let Some(&top) = stack.last() {
                if top != '(' && precedence(top) >= precedence(c) {
                    postfix.push(top);
                    stack.pop();
                } else {
                    break;
                }
            }
            stack.push(c);
            expect_operand = c != '~';
        }
    }

    while let Some(op) = stack.pop() {
        if op == '(' {
            return None;
        }
        postfix.push(op);
    }

    Some(postfix)
}

/// Evaluates a postfix expression against a variable assignment.
///
/// Total: malformed postfix or an unbound variable yields `false`.
pub fn eval_postfix(postfix: &str, values: &HashMap<char, bool>) -> bool {
    if postfix.is_empty() {
        return false;
    }

    let mut stack: Vec<bool> = Vec::new();
    for c in postfix.chars() {
        if c.is_ascii_alphabetic() {
            stack.push(values.get(&c).copied().unwrap_or(false));
        } else if c == '~' {
            match stack.pop() {
                Some(a) => stack.push(!a),
                None => return false,
            }
        } else {
            let (b, a) = match (stack.pop(), stack.pop()) {
                (Some(b), Some(a)) => (b, a),
                _ => return false,
            };
            let value = match c {
                '.' => a && b,
                '+' => a || b,
                '^' => a != b,
                _ => false,
            };
            stack.push(value);
        }
    }

    if stack.len() == 1 {
        stack[0]
    } else {
        false
    }
}

/// Evaluates an infix expression against a variable assignment.
pub fn eval(infix: &str, values: &HashMap<char, bool>) -> bool {
    match to_postfix(infix) {
        Some(postfix) => eval_postfix(&postfix, values),
        None => false,
    }
}

/// The sorted, deduplicated variables of an expression.
pub fn variables(expr: &str) -> Vec<char> {
    let mut vars: Vec<char> = expr.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    vars.sort_unstable();
    vars.dedup();
    vars
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::*;

    fn assign(pairs: &[(char, bool)]) -> HashMap<char, bool> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_clean_valid() {
        assert_eq!(clean("A.B + ~C"), Some("A.B+~C".to_string()));
        assert_eq!(clean("(A+B).(A+C)"), Some("(A+B).(A+C)".to_string()));
        assert_eq!(clean("~(A^B)"), Some("~(A^B)".to_string()));
    }

    #[test]
    fn test_clean_invalid() {
        assert_eq!(clean("A..B"), None); // consecutive operators
        assert_eq!(clean("AB"), None); // adjacent operands
        assert_eq!(clean("(A+B"), None); // unbalanced
        assert_eq!(clean("A+B)"), None); // negative paren depth
        assert_eq!(clean("A+.B"), None);
    }

    #[test]
    fn test_clean_allows_leading_negation() {
        assert_eq!(clean("~A.~B"), Some("~A.~B".to_string()));
        assert_eq!(clean("A+~(B.C)"), Some("A+~(B.C)".to_string()));
    }

    #[test]
    fn test_double_negation_collapse() {
        assert_eq!(collapse_double_negation("~~A"), "A");
        assert_eq!(collapse_double_negation("~~~A"), "~A");
        assert_eq!(collapse_double_negation("~~~~A"), "A");
        assert_eq!(collapse_double_negation("A+~~B"), "A+B");
    }

    #[test]
    fn test_to_postfix_precedence() {
        assert_eq!(to_postfix("A+B.C"), Some("ABC.+".to_string()));
        assert_eq!(to_postfix("(A+B).C"), Some("AB+C.".to_string()));
        assert_eq!(to_postfix("~A.B"), Some("A~B.".to_string()));
        assert_eq!(to_postfix("A^B+C"), Some("AB^C+".to_string()));
    }

    #[test]
    fn test_to_postfix_invalid() {
        assert_eq!(to_postfix(""), None);
        assert_eq!(to_postfix("A B"), None);
        assert_eq!(to_postfix("+A"), None);
    }

    #[test]
    fn test_eval_basic() {
        let values = assign(&[('A', true), ('B', false)]);
        assert_eq!(eval("A.B", &values), false);
        assert_eq!(eval("A+B", &values), true);
        assert_eq!(eval("A^B", &values), true);
        assert_eq!(eval("~A", &values), false);
        assert_eq!(eval("~(A.B)", &values), true);
    }

    #[test]
    fn test_eval_precedence() {
        // A + B.C with B.C = false, A = true
        let values = assign(&[('A', true), ('B', true), ('C', false)]);
        assert_eq!(eval("A+B.C", &values), true);
        assert_eq!(eval("(A+B).C", &values), false);
    }

    #[test]
    fn test_eval_unbound_variable_is_false() {
        let values = assign(&[('A', true)]);
        assert_eq!(eval("A.Z", &values), false);
        assert_eq!(eval("A+Z", &values), true);
    }

    #[test]
    fn test_eval_invalid_is_false() {
        let values = assign(&[('A', true)]);
        assert_eq!(eval("A..A", &values), false);
        assert_eq!(eval("", &values), false);
    }

    #[test]
    fn test_variables() {
        assert_eq!(variables("B.A+~C.A"), vec!['A', 'B', 'C']);
        assert_eq!(variables("(~X^Y)"), vec!['X', 'Y']);
        assert!(variables("()+.~").is_empty());
    }
}

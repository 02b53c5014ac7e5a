//! Two-level minimization of boolean functions.
//!
//! Quine–McCluskey prime-implicant reduction: true minterms are written as
//! N-bit pattern strings, grouped by ones-count, and repeatedly combined
//! pairwise when two patterns differ in exactly one position (the differing
//! bit becomes a `-` don't-care). Patterns that survive uncombined are prime
//! implicants; rendering them back as product terms and joining with `+`
//! gives a near-minimal sum-of-products form. The result is heuristic, not
//! guaranteed globally minimal.

use std::collections::BTreeSet;

use log::debug;

/// Minimizes the function given by its minterm bit-vector.
///
/// `minterms[i]` is the function value on the assignment with row index `i`
/// (MSB = first variable in `vars`); `minterms.len()` must be
/// `2^vars.len()`. Returns `"1"` for a tautology, `"0"` for the empty
/// function, and otherwise a sum of products such as `~A.B + A.~B`. The
/// two-variable two-implicant complementary pattern is recognized and
/// rendered as XOR (`A^B`).
pub fn simplify(minterms: &[bool], vars: &[char]) -> String {
    if vars.is_empty() || minterms.is_empty() {
        return "0".to_string();
    }

    let true_minterms: Vec<usize> = (0..minterms.len()).filter(|&i| minterms[i]).collect();
    if true_minterms.is_empty() {
        return "0".to_string();
    }
    if true_minterms.len() == minterms.len() {
        return "1".to_string();
    }

    let primes = prime_implicants(&true_minterms, vars.len());
    if primes.is_empty() {
        return "0".to_string();
    }

    if let Some(xor) = recognize_xor(&primes, vars) {
        return xor;
    }

    let terms: Vec<String> = primes.iter().map(|p| term_for_pattern(p, vars)).collect();
    if terms.is_empty() {
        "0".to_string()
    } else {
        terms.join(" + ")
    }
}

/// Minimizes a typed infix expression by tabulating it first.
///
/// Convenience wrapper: builds the expression's truth table and minimizes
/// its minterm set.
pub fn simplify_expression(expr: &str) -> Result<String, crate::error::LogicError> {
    let table = crate::truth_table::TruthTable::of_expression(expr)?;
    Ok(table.minimized())
}

/// Computes the prime implicant patterns of the given true minterms.
///
/// Patterns are strings over `0`/`1`/`-`, MSB first. The returned set orders
/// them lexicographically, which fixes the term order of the final
/// expression.
pub fn prime_implicants(true_minterms: &[usize], num_vars: usize) -> BTreeSet<String> {
    // Group patterns by ones-count; only adjacent groups can combine.
    let mut groups: Vec<Vec<(String, bool)>> = vec![Vec::new(); num_vars + 1];
    for &m in true_minterms {
        let pattern = bit_pattern(m, num_vars);
        let ones = pattern.chars().filter(|&c| c == '1').count();
        groups[ones].push((pattern, false));
    }

    let mut primes = BTreeSet::new();
    let mut generation = 0;
    loop {
        let mut next: Vec<BTreeSet<String>> = vec![BTreeSet::new(); num_vars + 1];
        let mut combined_any = false;

        for i in 0..num_vars {
            // Split at i+1 so both groups can be borrowed mutably at once.
            let (head, tail) = groups.split_at_mut(i + 1);
            let group = &mut head[i];
            let next_group = &mut tail[0];
            for a in 0..group.len() {
                for b in 0..next_group.len() {
                    if can_combine(&group[a].0, &next_group[b].0) {
                        next[i].insert(combine(&group[a].0, &next_group[b].0));
                        group[a].1 = true;
                        next_group[b].1 = true;
                        combined_any = true;
                    }
                }
            }
        }

        for group in &groups {
            for (pattern, used) in group {
                if !used {
                    primes.insert(pattern.clone());
                }
            }
        }

        debug!(
            "generation {}: combined_any={}, primes so far={}",
            generation,
            combined_any,
            primes.len()
        );
        if !combined_any {
            break;
        }
        groups = next
            .into_iter()
            .map(|set| set.into_iter().map(|p| (p, false)).collect())
            .collect();
        generation += 1;
    }

    primes
}

/// Writes `value` as an MSB-first bit string of the given width.
pub fn bit_pattern(value: usize, width: usize) -> String {
    (0..width)
        .rev()
        .map(|bit| if (value >> bit) & 1 == 1 { '1' } else { '0' })
        .collect()
}

fn can_combine(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut differences = 0;
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca != cb {
            // A '-' never matches a bit, so combining requires the dash
            // positions to agree as well.
            if ca == '-' || cb == '-' {
                return false;
            }
            differences += 1;
            if differences > 1 {
                return false;
            }
        }
    }
    differences == 1
}

fn combine(a: &str, b: &str) -> String {
    a.chars()
        .zip(b.chars())
        .map(|(ca, cb)| if ca == cb { ca } else { '-' })
        .collect()
}

/// Renders a pattern back to a product term: `0` → negated variable, `1` →
/// variable, `-` → omitted. The all-don't-care pattern renders as `1`.
fn term_for_pattern(pattern: &str, vars: &[char]) -> String {
    let mut literals = Vec::new();
    for (i, c) in pattern.chars().enumerate() {
        if i >= vars.len() {
            break;
        }
        match c {
            '0' => literals.push(format!("~{}", vars[i])),
            '1' => literals.push(vars[i].to_string()),
            _ => (),
        }
    }
    if literals.is_empty() {
        "1".to_string()
    } else {
        literals.join(".")
    }
}

/// Recognizes exactly two complementary implicants over exactly two
/// variables as XOR.
fn recognize_xor(primes: &BTreeSet<String>, vars: &[char]) -> Option<String> {
    if primes.len() != 2 || vars.len() != 2 {
        return None;
    }
    let mut it = primes.iter();
    let a = it.next()?;
    let b = it.next()?;
    let complementary = a
        .chars()
        .zip(b.chars())
        .all(|(ca, cb)| (ca == '0' && cb == '1') || (ca == '1' && cb == '0'));
    // "00"/"11" is also complementary but is XNOR; only the odd-parity pair
    // "01"/"10" is XOR.
    let odd_parity = a.chars().filter(|&c| c == '1').count() == 1;
    if complementary && odd_parity {
        Some(format!("{}^{}", vars[0], vars[1]))
    } else {
        None
    }
}

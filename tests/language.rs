use std::fs;

use scenegen::evaluate;
use walkdir::WalkDir;

#[test]
fn docs_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("docs").into_iter()
                            .filter_map(Result::ok)
                            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for line in extract_blocks(&content, "```scenegen\n") {
            count += 1;
            check_line(&line).unwrap_or_else(|e| panic!("Example '{line}' in {path:?} failed: {e}"));
        }
        for line in extract_blocks(&content, "```scenegen-error\n") {
            count += 1;
            assert!(evaluate(&line).is_err(),
                    "Example '{line}' in {path:?} succeeded but was expected to fail");
        }
    }

    assert!(count > 0, "No examples found in docs");
}

/// Evaluates `expr` or `expr => expected`.
fn check_line(line: &str) -> Result<(), String> {
    let (expr, expected) = match line.split_once("=>") {
        Some((expr, expected)) => (expr, Some(expected)),
        None => (line, None),
    };

    let value = evaluate(expr).map_err(|e| e.to_string())?;
    if let Some(expected) = expected {
        let expected = evaluate(expected).map_err(|e| e.to_string())?;
        if (value - expected).abs() > 1e-9 * expected.abs().max(1.0) {
            return Err(format!("got {value}, expected {expected}"));
        }
    }
    Ok(())
}

/// Non-empty lines of every fenced block opened by `fence`.
fn extract_blocks(content: &str, fence: &str) -> Vec<String> {
    let opening = fence.trim_end();
    let mut lines = Vec::new();
    let mut inside = false;

    for line in content.lines() {
        let trimmed = line.trim();
        if !inside && trimmed == opening {
            inside = true;
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            continue;
        }
        if inside && !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines
}

fn assert_success(src: &str) {
    if let Err(e) = evaluate(src) {
        panic!("Expression '{src}' failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if evaluate(src).is_ok() {
        panic!("Expression '{src}' succeeded but was expected to fail")
    }
}

#[test]
fn material_properties() {
    assert_success("2.1e11");
    assert_success("7800 * 9.81");
    assert_success("0.5 * 1e-3 / (2 * pi)");
}

#[test]
fn dynamic_evaluation_is_closed() {
    assert_failure("__import__('os')");
    assert_failure("eval(1)");
    assert_failure("math.floor(2.5)");
    assert_failure("x if 1 else 2");
    assert_failure("lambda: 1");
    assert_failure("1; 2");
}

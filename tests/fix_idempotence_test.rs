//! Applying every available fix and re-running the engine must leave zero
//! violations of the kinds that carried a fix.

use std::path::Path;

use wraplint::analyzers::parse_source;
use wraplint::config::WraplintConfig;
use wraplint::core::{Fix, JsLanguageVariant, Violation};
use wraplint::io::apply_fixes;
use wraplint::registry::KnownApiRegistry;
use wraplint::rules::analyze_module;

fn analyze(source: &str) -> Vec<Violation> {
    let module =
        parse_source(source, Path::new("fixture.ts"), JsLanguageVariant::TypeScript).unwrap();
    analyze_module(
        &module,
        &WraplintConfig::default(),
        &KnownApiRegistry::builtin(),
    )
}

fn fix_and_reanalyze(source: &str) -> (String, Vec<Violation>) {
    let violations = analyze(source);
    let fixes: Vec<Fix> = violations.iter().filter_map(|v| v.fix.clone()).collect();
    let (rewritten, _) = apply_fixes(source, &fixes);
    let remaining = analyze(&rewritten);
    (rewritten, remaining)
}

#[test]
fn wrapped_absence_call_is_quiet_after_fix() {
    let (rewritten, remaining) = fix_and_reanalyze("const x = items.find(p => p.id === id);");

    assert_eq!(rewritten, "const x = wrap(() => items.find(p => p.id === id));");
    assert!(remaining.iter().all(|v| v.fix.is_none()));
    assert!(remaining.is_empty());
}

#[test]
fn rewritten_throw_is_quiet_after_fix() {
    let (rewritten, remaining) = fix_and_reanalyze("function g() { throw \"oops\"; }");

    assert_eq!(
        rewritten,
        "function g() { return captureError(makeError(\"oops\")); }"
    );
    assert!(remaining.is_empty());
}

#[test]
fn rewritten_try_block_is_quiet_after_fix() {
    let (rewritten, remaining) =
        fix_and_reanalyze("try { JSON.parse(raw); } catch (e) { recover(); }");

    assert_eq!(rewritten, "wrap(() => { JSON.parse(raw); });");
    // the parse call now sits inside the capture thunk
    assert!(remaining.is_empty());
}

#[test]
fn throw_inside_try_converges_via_block_fix() {
    let (rewritten, remaining) = fix_and_reanalyze("try { throw makeThing(); } catch (e) {}");

    // the throw carries no fix of its own; the block rewrite subsumes it
    assert_eq!(rewritten, "wrap(() => { throw makeThing(); });");
    assert!(remaining.is_empty());
}

#[test]
fn mixed_file_converges_to_manual_fixes_only() {
    let source = "\
function f(): string | null { return null; }
const a = JSON.parse(raw);
function g() { throw \"bad\"; }
";
    let (_, remaining) = fix_and_reanalyze(source);

    // only the annotation violation survives, and it never carries a fix
    assert!(remaining.iter().all(|v| v.fix.is_none()));
    assert_eq!(remaining.len(), 1);
}

#[test]
fn multiple_fixes_in_one_file_do_not_collide() {
    let source = "\
const a = items.find(p => p.active);
const b = others.pop();
const c = JSON.parse(raw);
";
    let violations = analyze(source);
    let fixes: Vec<Fix> = violations.iter().filter_map(|v| v.fix.clone()).collect();
    assert_eq!(fixes.len(), 3);

    let (rewritten, applied) = apply_fixes(source, &fixes);
    assert_eq!(applied, 3);
    assert!(rewritten.contains("wrap(() => items.find(p => p.active))"));
    assert!(rewritten.contains("wrap(() => others.pop())"));
    assert!(rewritten.contains("wrap(() => JSON.parse(raw))"));

    assert!(analyze(&rewritten).is_empty());
}

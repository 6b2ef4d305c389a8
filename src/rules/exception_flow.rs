//! Throw/try-catch enforcement
//!
//! Flags throw statements, try/catch blocks, and direct calls to
//! operations known to throw. Rewrites route the failure through the
//! wrapper surface instead: thrown values become returned error values,
//! guarded blocks become captured thunks.

use crate::analyzers::containment::{inside_capture_thunk, inside_try_block, CAPTURE_CALLEES};
use crate::analyzers::parser::resolve_callee;
use crate::config::RuleSettings;
use crate::core::{ParsedModule, Violation, ViolationKind};
use crate::fixes::{fix_for_call, fix_for_throw, fix_for_try};
use crate::patterns::WildcardMatcher;
use crate::registry::{CallFamily, KnownApiRegistry};
use crate::rules::{enclosing_function_name, make_violation, EXCEPTIONS_RULE};
use crate::suppression::is_test_file;
use tree_sitter::Node;

pub fn check(
    module: &ParsedModule,
    settings: &RuleSettings,
    registry: &KnownApiRegistry,
    out: &mut Vec<Violation>,
) {
    if settings.allow_test_files && is_test_file(&module.path) {
        log::debug!(
            "{} matches test-file conventions, skipping exception checks",
            module.path.display()
        );
        return;
    }

    let matcher = WildcardMatcher::new(&settings.allow_exceptions);
    let root = module.root();

    check_statements(&root, module, settings, &matcher, out);
    check_throwing_calls(&root, module, settings, registry, &matcher, out);
}

/// Statement detection family: throw statements and guarded blocks.
fn check_statements(
    node: &Node,
    module: &ParsedModule,
    settings: &RuleSettings,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    for child in children {
        match child.kind() {
            "throw_statement" => check_throw(&child, module, settings, matcher, out),
            "try_statement" => check_try(&child, module, settings, matcher, out),
            _ => {}
        }
        check_statements(&child, module, settings, matcher, out);
    }
}

fn check_throw(
    statement: &Node,
    module: &ParsedModule,
    settings: &RuleSettings,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let source = &module.source;
    if is_exempt(statement, source, matcher) {
        return;
    }

    // A throw inside a guarded block is still reported, but its rewrite
    // would overlap the block's own rewrite, so it gets no fix.
    let fix = if settings.auto_fix && !inside_try_block(statement) {
        fix_for_throw(statement, source)
    } else {
        None
    };

    out.push(make_violation(
        ViolationKind::NoThrowStatement,
        EXCEPTIONS_RULE,
        statement,
        "throw bypasses the Result contract; return captureError(...) instead".to_string(),
        fix,
    ));
}

fn check_try(
    statement: &Node,
    module: &ParsedModule,
    settings: &RuleSettings,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let source = &module.source;
    if is_exempt(statement, source, matcher) {
        return;
    }

    // fix_for_try declines on nested constructs; those are still reported
    let fix = if settings.auto_fix {
        fix_for_try(statement, source)
    } else {
        None
    };

    out.push(make_violation(
        ViolationKind::NoTryCatchBlock,
        EXCEPTIONS_RULE,
        statement,
        "try/catch hides failures; capture the block with wrap(...) instead".to_string(),
        fix,
    ));
}

/// Call-expression detection family: direct calls to registered throwing
/// operations.
fn check_throwing_calls(
    node: &Node,
    module: &ParsedModule,
    settings: &RuleSettings,
    registry: &KnownApiRegistry,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    for child in children {
        if child.kind() == "call_expression" {
            check_call(&child, module, settings, registry, matcher, out);
        }
        check_throwing_calls(&child, module, settings, registry, matcher, out);
    }
}

fn check_call(
    call: &Node,
    module: &ParsedModule,
    settings: &RuleSettings,
    registry: &KnownApiRegistry,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let source = &module.source;
    let Some((owner, member)) = resolve_callee(call, source) else {
        return;
    };
    if registry.classify_call(owner.as_deref(), &member) != Some(CallFamily::Throwing) {
        return;
    }

    let qualified = match &owner {
        Some(owner) => format!("{owner}.{member}"),
        None => member.clone(),
    };
    if matcher.matches(&member) || matcher.matches(&qualified) {
        return;
    }
    if inside_capture_thunk(call, source, CAPTURE_CALLEES) || inside_try_block(call) {
        return;
    }

    let asynchronous = registry.is_likely_async(&member);
    let kind = if asynchronous {
        ViolationKind::UseWrapAsync
    } else {
        ViolationKind::UseWrapSync
    };
    let template = if asynchronous { "wrapAsync" } else { "wrap" };
    let fix = settings
        .auto_fix
        .then(|| fix_for_call(call, source, asynchronous));

    out.push(make_violation(
        kind,
        EXCEPTIONS_RULE,
        call,
        format!("{qualified} can throw; capture it with {template}(() => ...)"),
        fix,
    ));
}

fn is_exempt(node: &Node, source: &str, matcher: &WildcardMatcher) -> bool {
    if inside_capture_thunk(node, source, CAPTURE_CALLEES) {
        return true;
    }
    enclosing_function_name(node, source).is_some_and(|name| matcher.matches(&name))
}

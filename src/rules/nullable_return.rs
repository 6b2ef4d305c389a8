//! Nullable-return enforcement
//!
//! Flags functions whose declared or inferred return flow admits an absent
//! value, nullable union annotations on declarations, and direct calls to
//! lookup-style operations known to signal "not found" with
//! null/undefined. The annotation kinds never carry a fix: rewriting a
//! type without rewriting every return would change semantics.

use crate::analyzers::containment::{inside_capture_thunk, inside_try_block, CAPTURE_CALLEES};
use crate::analyzers::parser::{is_function_like, node_text, resolve_callee};
use crate::analyzers::return_flow::profile_function;
use crate::analyzers::type_classifier::{classify, is_absence_capable, representative_label};
use crate::config::RuleSettings;
use crate::core::{ParsedModule, Violation, ViolationKind};
use crate::fixes::fix_for_call;
use crate::patterns::WildcardMatcher;
use crate::registry::{CallFamily, KnownApiRegistry};
use crate::rules::{function_name, make_violation, NULLABLE_RULE};
use tree_sitter::Node;

pub fn check(
    module: &ParsedModule,
    settings: &RuleSettings,
    registry: &KnownApiRegistry,
    out: &mut Vec<Violation>,
) {
    let matcher = WildcardMatcher::new(&settings.allow_exceptions);
    let root = module.root();

    check_return_types(&root, module, &matcher, out);
    check_absence_calls(&root, module, settings, registry, &matcher, out);
}

/// Return-type detection family: function signatures and bodies, plus
/// annotated declarations.
fn check_return_types(
    node: &Node,
    module: &ParsedModule,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();

    for child in children {
        match child.kind() {
            kind if is_function_like(kind) => check_function(&child, module, matcher, out),
            "variable_declarator" | "public_field_definition" => {
                check_declaration(&child, module, matcher, out)
            }
            _ => {}
        }
        // keep descending: nested functions and declarations are each
        // judged on their own
        check_return_types(&child, module, matcher, out);
    }
}

fn check_function(
    function: &Node,
    module: &ParsedModule,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let source = &module.source;
    if let Some(name) = function_name(function, source) {
        if matcher.matches(&name) {
            return;
        }
    }

    // An explicit annotation is judged on its own; the body profile only
    // decides for unannotated functions.
    if let Some(return_type) = function.child_by_field_name("return_type") {
        let shape = classify(&return_type, source);
        if is_absence_capable(&shape) {
            let label = representative_label(&shape);
            out.push(make_violation(
                ViolationKind::NoNullableReturn,
                NULLABLE_RULE,
                &return_type,
                format!("nullable return; use Option<{label}> instead"),
                None,
            ));
        }
        return;
    }

    let profile = profile_function(function, source);
    if profile.is_flagged() {
        let label = profile.label();
        out.push(make_violation(
            ViolationKind::NoNullableReturn,
            NULLABLE_RULE,
            function,
            format!("function may return an absent value; use Option<{label}> instead"),
            None,
        ));
    }
}

fn check_declaration(
    declaration: &Node,
    module: &ParsedModule,
    matcher: &WildcardMatcher,
    out: &mut Vec<Violation>,
) {
    let source = &module.source;
    let Some(type_annotation) = declaration.child_by_field_name("type") else {
        return;
    };

    let shape = classify(&type_annotation, source);
    if !is_absence_capable(&shape) {
        return;
    }

    if let Some(name) = declaration.child_by_field_name("name") {
        if matcher.matches(node_text(&name, source)) {
            return;
        }
    }

    let label = representative_label(&shape);
    out.push(make_violation(
        ViolationKind::NoNullableUnion,
        NULLABLE_RULE,
        &type_annotation,
        format!("nullable union type; use Option<{label}> instead"),
        None,
    ));
}

/// Call-expression detection family: direct calls to registered
/// absence-producing operations.
fn check_absence_calls(
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
        check_absence_calls(&child, module, settings, registry, matcher, out);
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
    if registry.classify_call(owner.as_deref(), &member) != Some(CallFamily::Absence) {
        return;
    }

    if matcher.matches(&member) {
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
        NULLABLE_RULE,
        call,
        format!("{member} may return an absent value; capture it with {template}(() => ...)"),
        fix,
    ));
}

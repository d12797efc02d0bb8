//! Tests for the binding event stream reported to `BindTracer`s.

use callbind::{
    Annotations, ArgValues, BindErrorKind, Callable, Function, NoPrint, Object, RecordingTracer, Signature,
    StderrTracer, TraceEvent, Type, check_types,
};
use pretty_assertions::assert_eq;

fn bind_event(func_name: &str, positional: usize, keywords: usize) -> TraceEvent {
    TraceEvent::Bind {
        func_name: func_name.to_owned(),
        positional,
        keywords,
    }
}

#[test]
fn records_the_source_of_every_parameter() {
    let sig = Signature::builder()
        .arg("a")
        .arg_with_default("b", 0)
        .var_args("rest")
        .keyword_only("k")
        .var_kwargs("kw")
        .build()
        .unwrap();
    let mut tracer = RecordingTracer::new();
    sig.bind_traced("f", ArgValues::positional([1]).kwarg("k", 2).kwarg("z", 3), &mut tracer)
        .unwrap();
    assert_eq!(
        tracer.into_events(),
        vec![
            bind_event("f", 1, 2),
            TraceEvent::Positional { param: "a".to_owned() },
            TraceEvent::Default { param: "b".to_owned() },
            TraceEvent::Keyword { param: "k".to_owned() },
            TraceEvent::VarArgs {
                param: "rest".to_owned(),
                count: 0,
            },
            TraceEvent::VarKwargs {
                param: "kw".to_owned(),
                count: 1,
            },
        ]
    );
}

#[test]
fn fast_path_reports_the_same_events() {
    let sig = Signature::builder().arg("a").arg_with_default("b", 0).build().unwrap();
    assert!(sig.is_simple());
    let mut tracer = RecordingTracer::new();
    sig.bind_traced("f", ArgValues::positional([1]), &mut tracer).unwrap();
    assert_eq!(
        tracer.events(),
        [
            bind_event("f", 1, 0),
            TraceEvent::Positional { param: "a".to_owned() },
            TraceEvent::Default { param: "b".to_owned() },
        ]
    );
}

#[test]
fn failure_ends_with_an_error_event() {
    let sig = Signature::builder().arg("a").build().unwrap();
    let mut tracer = RecordingTracer::new();
    sig.bind_traced("f", ArgValues::positional([1]).kwarg("a", 1), &mut tracer)
        .unwrap_err();
    assert_eq!(
        tracer.events().last(),
        Some(&TraceEvent::Error {
            kind: BindErrorKind::DuplicateArgument,
            message: "f() got multiple values for argument 'a'".to_owned(),
        })
    );
    tracer.clear();
    assert!(tracer.events().is_empty());
}

#[test]
fn decorated_calls_are_traced_once() {
    let sig = Signature::builder().arg("a").build().unwrap();
    let func = check_types(
        Function::new("f", sig, |_, _| Ok(Object::None)),
        Annotations::new().with("a", Type::Int),
    );
    let mut tracer = RecordingTracer::new();
    func.call_traced(ArgValues::positional([1]), &mut NoPrint, &mut tracer)
        .unwrap();
    let binds = tracer
        .events()
        .iter()
        .filter(|event| matches!(event, TraceEvent::Bind { .. }))
        .count();
    assert_eq!(binds, 1);

    let mut stderr = StderrTracer::new();
    func.call_traced(ArgValues::positional([1]), &mut NoPrint, &mut stderr)
        .unwrap();
    func.call_traced(ArgValues::new(), &mut NoPrint, &mut stderr)
        .unwrap_err();
    assert_eq!(stderr.calls(), 2);
}

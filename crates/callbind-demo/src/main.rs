use std::{env, process::ExitCode};

use callbind::{
    Annotations, ArgValues, BindTracer, Callable, ExcType, Function, NoopTracer, Object, Predicate,
    PrintWriter, RunResult, Signature, StdPrint, StderrTracer, Type, Value, check_types, validate,
};

fn main() -> ExitCode {
    let trace = env::args().skip(1).any(|arg| arg == "--trace");
    let mut tracer: Box<dyn BindTracer> = if trace {
        Box::new(StderrTracer::new())
    } else {
        Box::new(NoopTracer)
    };

    let result = example_type_check(&mut *tracer).and_then(|()| example_validate(&mut *tracer));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// `def example_func(a: int, b: str = "text")` wrapped with `check_types`.
fn example_type_check(tracer: &mut dyn BindTracer) -> RunResult<()> {
    let sig = Signature::builder().arg("a").arg_with_default("b", "text").build()?;
    let func = check_types(
        example_func(sig),
        Annotations::new().with("a", Type::Int).with("b", Type::Str),
    );
    let variants: [Vec<Value>; 4] = [
        vec![1.into(), "other text".into()],
        vec![1.into()],
        vec!["text".into(), "text".into()],
        vec![1.into(), 1.into()],
    ];
    run_variants(&func, variants, tracer)
}

/// `def example_func(a: lambda a: a > 1, b: lambda b: b.startswith("foo") = "foo")`
/// wrapped with `validate`.
fn example_validate(tracer: &mut dyn BindTracer) -> RunResult<()> {
    let sig = Signature::builder().arg("a").arg_with_default("b", "foo").build()?;
    let func = validate(
        example_func(sig),
        Annotations::new()
            .with("a", Predicate::new("a > 1", |a| a.as_int().is_some_and(|a| a > 1)))
            .with(
                "b",
                Predicate::new("b.startswith('foo')", |b| b.as_str().is_some_and(|b| b.starts_with("foo"))),
            ),
    );
    let variants: [Vec<Value>; 4] = [
        vec![10.into(), "foonction".into()],
        vec![10.into()],
        vec![0.into()],
        vec![5.into(), "quxx".into()],
    ];
    run_variants(&func, variants, tracer)
}

fn example_func(sig: Signature) -> Function {
    Function::new("example_func", sig, |bound, print| {
        print.print_line(&format!(
            "I was called with {} and {}",
            bound["a"].py_repr(),
            bound["b"].py_repr()
        ))?;
        Ok(Object::None)
    })
}

/// Calls `func` once per argument tuple, reporting `TypeError`s and propagating anything else.
fn run_variants(
    func: &impl Callable,
    variants: impl IntoIterator<Item = Vec<Value>>,
    tracer: &mut dyn BindTracer,
) -> RunResult<()> {
    let mut print = StdPrint;
    for positional in variants {
        let args = ArgValues::positional(positional);
        print.print_line(&format!("Calling function with {}", args.positional_repr()))?;
        match func.call_traced(args, &mut print, tracer) {
            Ok(_) => {}
            Err(err) if err.exc_type() == ExcType::TypeError => {
                print.print_line(&format!("TypeError raised: {}", err.message().unwrap_or_default()))?;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

use std::hint::black_box;

use callbind::{Annotations, ArgValues, Callable, Function, NoPrint, Object, Signature, Type, check_types};
use criterion::{Bencher, Criterion, criterion_group, criterion_main};

/// Binds a freshly built call on every iteration; building the `ArgValues` is part of the cost.
fn run_bind(bench: &mut Bencher, sig: &Signature, make_args: impl Fn() -> ArgValues, expected_len: usize) {
    let bound = sig.bind("f", make_args()).unwrap();
    assert_eq!(bound.len(), expected_len);

    bench.iter(|| {
        let bound = sig.bind("f", make_args()).unwrap();
        black_box(bound);
    });
}

/// `def f(a, b, c)` called as `f(1, 2, 3)`: the positional fast path.
fn simple_positional(bench: &mut Bencher) {
    let sig = Signature::builder().arg("a").arg("b").arg("c").build().unwrap();
    run_bind(bench, &sig, || ArgValues::positional([1, 2, 3]), 3);
}

/// `def f(a, b=2, c=3)` called as `f(1, c=4)`: defaults plus a keyword lookup.
fn defaults_and_keyword(bench: &mut Bencher) {
    let sig = Signature::builder()
        .arg("a")
        .arg_with_default("b", 2)
        .arg_with_default("c", 3)
        .build()
        .unwrap();
    run_bind(bench, &sig, || ArgValues::new().arg(1).kwarg("c", 4), 3);
}

/// `def f(a, /, b, *rest, k, **kw)` exercising every parameter kind.
fn every_kind(bench: &mut Bencher) {
    let sig = Signature::builder()
        .positional_only("a")
        .arg("b")
        .var_args("rest")
        .keyword_only("k")
        .var_kwargs("kw")
        .build()
        .unwrap();
    run_bind(
        bench,
        &sig,
        || ArgValues::positional([1, 2, 3, 4]).kwarg("k", 5).kwarg("x", 6),
        3,
    );
}

/// A `check_types` call: bind, check two annotations, apply.
fn decorated_call(bench: &mut Bencher) {
    let sig = Signature::builder().arg("a").arg_with_default("b", "text").build().unwrap();
    let func = check_types(
        Function::new("f", sig, |bound, _| Ok(Object::clone(&bound["a"]))),
        Annotations::new().with("a", Type::Int).with("b", Type::Str),
    );
    bench.iter(|| {
        let result = func.call(ArgValues::positional([1]), &mut NoPrint).unwrap();
        black_box(result);
    });
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("bind__simple_positional", simple_positional);
    c.bench_function("bind__defaults_and_keyword", defaults_and_keyword);
    c.bench_function("bind__every_kind", every_kind);
    c.bench_function("call__check_types", decorated_call);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

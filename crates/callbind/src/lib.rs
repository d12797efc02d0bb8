#![doc = include_str!("../../../README.md")]

mod args;
mod decorator;
mod exception;
mod expectation;
mod function;
mod io;
mod object;
mod signature;
pub mod tracer;
mod types;

pub use crate::{
    args::{ArgValues, BoundArguments},
    decorator::{CheckMode, Decorated, ValidationError, check_types, validate},
    exception::{BindError, BindErrorKind, ExcType, Exception, RunResult, SignatureError},
    expectation::{Annotations, Expectation, Predicate},
    function::{Callable, Function, FunctionBody},
    io::{CollectStringPrint, NoPrint, PrintWriter, StdPrint},
    object::{ConversionError, DictPairs, Object, Value},
    signature::{ParamKind, Parameter, Signature, SignatureBuilder},
    tracer::{BindTracer, NoopTracer, RecordingTracer, StderrTracer, TraceEvent},
    types::Type,
};

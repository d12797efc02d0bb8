use std::{fmt, sync::Arc};

use crate::{
    args::{ArgValues, BoundArguments},
    exception::RunResult,
    io::PrintWriter,
    object::Object,
    signature::Signature,
    tracer::{BindTracer, NoopTracer},
};

/// The body of a [`Function`]: runs with already-bound arguments.
pub type FunctionBody = dyn Fn(&BoundArguments, &mut dyn PrintWriter) -> RunResult<Object> + Send + Sync;

/// Something that can be called with Python call semantics.
///
/// A call is always `bind` followed by [`Callable::apply`], so wrappers can bind once,
/// inspect the result, and then forward the very same binding to the wrapped callable.
pub trait Callable: Send + Sync {
    /// Name used in binding error messages.
    fn name(&self) -> &str;

    fn signature(&self) -> &Signature;

    /// Runs the callable with arguments that were already bound against [`Callable::signature`].
    ///
    /// Errors raised by the body propagate unchanged.
    fn apply(&self, bound: &BoundArguments, print: &mut dyn PrintWriter) -> RunResult<Object>;

    /// Calls with call-site arguments: bind, then apply.
    fn call(&self, args: ArgValues, print: &mut dyn PrintWriter) -> RunResult<Object> {
        self.call_traced(args, print, &mut NoopTracer)
    }

    /// Same as [`Callable::call`], reporting binding decisions to `tracer`.
    fn call_traced(
        &self,
        args: ArgValues,
        print: &mut dyn PrintWriter,
        tracer: &mut dyn BindTracer,
    ) -> RunResult<Object> {
        let bound = self.signature().bind_traced(self.name(), args, tracer)?;
        self.apply(&bound, print)
    }
}

/// A user-defined function: a name, an explicit signature, and a body.
///
/// The signature is declared by the author rather than discovered at runtime; it
/// is built once and shared by every call.
#[derive(Clone)]
pub struct Function {
    name: String,
    signature: Signature,
    body: Arc<FunctionBody>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        signature: Signature,
        body: impl Fn(&BoundArguments, &mut dyn PrintWriter) -> RunResult<Object> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            signature,
            body: Arc::new(body),
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("signature", &self.signature.to_string())
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}{}>", self.name, self.signature)
    }
}

impl Callable for Function {
    fn name(&self) -> &str {
        &self.name
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Runs the body directly; a plain function checks nothing beyond binding.
    fn apply(&self, bound: &BoundArguments, print: &mut dyn PrintWriter) -> RunResult<Object> {
        (self.body)(bound, print)
    }
}

impl<C: Callable + ?Sized> Callable for Arc<C> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn signature(&self) -> &Signature {
        (**self).signature()
    }

    fn apply(&self, bound: &BoundArguments, print: &mut dyn PrintWriter) -> RunResult<Object> {
        (**self).apply(bound, print)
    }

    fn call_traced(
        &self,
        args: ArgValues,
        print: &mut dyn PrintWriter,
        tracer: &mut dyn BindTracer,
    ) -> RunResult<Object> {
        (**self).call_traced(args, print, tracer)
    }
}

//! Method table for a service.
//!
//! # Responsibilities
//! - Register service methods by name
//! - Record each method's parameter list for validation at bind time
//! - Erase the concrete signature so any registered method can be invoked
//!   with boxed arguments
//!
//! # Design Decisions
//! - Methods take `Arc<Self>` as receiver so bound handlers share the instance
//! - Arguments are passed as `Box<dyn Any>` and downcast in order; a mismatch
//!   yields a 500 response instead of a panic
//! - Arity 0 to 3 (beyond the receiver) can be registered; only a single
//!   `Context` parameter can be bound to a route

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

/// Future returned by an erased method call.
pub type MethodFuture = BoxFuture<'static, Response>;

/// Boxed argument list for an erased call.
pub type MethodArgs = Vec<Box<dyn Any + Send>>;

type ErasedCall<S> = Arc<dyn Fn(Arc<S>, MethodArgs) -> MethodFuture + Send + Sync>;

/// A declared method parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Param {
    type_id: TypeId,
    type_name: &'static str,
}

impl Param {
    pub fn of<T: 'static>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
        }
    }

    /// True when the parameter is exactly `T`: same type identity and name.
    pub fn is<T: 'static>(&self) -> bool {
        self.type_id == TypeId::of::<T>() && self.type_name == type_name::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// A registered method with its signature erased.
pub struct Method<S> {
    params: Vec<Param>,
    call: ErasedCall<S>,
}

impl<S> Method<S> {
    /// Parameters after the receiver.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Invoke against `service` with boxed arguments.
    pub fn call(&self, service: Arc<S>, args: MethodArgs) -> MethodFuture {
        (self.call)(service, args)
    }
}

impl<S> Clone for Method<S> {
    fn clone(&self) -> Self {
        Self {
            params: self.params.clone(),
            call: Arc::clone(&self.call),
        }
    }
}

impl<S> fmt::Debug for Method<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method").field("params", &self.params).finish()
    }
}

/// Conversion from an async function into a [`Method`].
///
/// Implemented for `Fn(Arc<S>, A1, ..) -> impl Future<Output = impl IntoResponse>`
/// with up to three arguments after the receiver.
pub trait IntoMethod<S, Args>: Send + Sync + 'static {
    fn into_method(self) -> Method<S>;
}

fn argument_mismatch(expected: &'static str) -> MethodFuture {
    tracing::error!(expected = %expected, "Method invoked with mismatched arguments");
    Box::pin(async { StatusCode::INTERNAL_SERVER_ERROR.into_response() })
}

macro_rules! impl_into_method {
    ($($arg:ident),*) => {
        impl<S, F, Fut, R, $($arg,)*> IntoMethod<S, ($($arg,)*)> for F
        where
            S: Send + Sync + 'static,
            F: Fn(Arc<S>, $($arg),*) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = R> + Send + 'static,
            R: IntoResponse,
            $($arg: Send + 'static,)*
        {
            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn into_method(self) -> Method<S> {
                let params = vec![$(Param::of::<$arg>()),*];
                let call: ErasedCall<S> = Arc::new(
                    move |service: Arc<S>, args: MethodArgs| -> MethodFuture {
                        let mut args = args.into_iter();
                        $(
                            let $arg = match args.next().map(|arg| arg.downcast::<$arg>()) {
                                Some(Ok(value)) => *value,
                                _ => return argument_mismatch(type_name::<$arg>()),
                            };
                        )*
                        let fut = (self)(service, $($arg),*);
                        Box::pin(async move { fut.await.into_response() })
                    },
                );
                Method { params, call }
            }
        }
    };
}

impl_into_method!();
impl_into_method!(A1);
impl_into_method!(A1, A2);
impl_into_method!(A1, A2, A3);

/// Methods a service exposes, by name.
pub struct MethodTable<S> {
    methods: HashMap<String, Method<S>>,
}

impl<S: Send + Sync + 'static> MethodTable<S> {
    pub fn new() -> Self {
        Self {
            methods: HashMap::new(),
        }
    }

    /// Register `method` under `name`, replacing any previous entry.
    pub fn register<F, Args>(&mut self, name: impl Into<String>, method: F) -> &mut Self
    where
        F: IntoMethod<S, Args>,
    {
        self.methods.insert(name.into(), method.into_method());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Method<S>> {
        self.methods.get(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl<S: Send + Sync + 'static> Default for MethodTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

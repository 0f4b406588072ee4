/// Implements [`Handler::name`](crate::Handler::name) with a fixed method name.
#[macro_export]
macro_rules! name {
    ($name:expr) => {
        fn name(&self) -> &str {
            $name
        }
    };
}

/// Implements [`Handler::call`](crate::Handler::call) from an async-looking body.
///
/// ```ignore
/// call! {
///     async fn call(&self, stub, args) {
///         Ok(args.join(",").into_bytes())
///     }
/// }
/// ```
#[macro_export]
macro_rules! call {
    (async fn call(& $self:ident, $stub:pat, $args:pat) { $($body:tt)* }) => {
        fn call<'call>(
            &'call $self,
            $stub: &'call dyn $crate::Stub,
            $args: ::std::vec::Vec<::std::string::String>,
        ) -> $crate::BoxFuture<'call, $crate::HandlerResult> {
            $crate::boxed_handler_future(async move {
                $($body)*
            })
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{ChaincodeStub, Handler};

    struct Join;

    impl Handler for Join {
        name!("join");
        call! {
            async fn call(&self, _stub, args) {
                Ok(args.join(",").into_bytes())
            }
        }
    }

    #[tokio::test]
    async fn macros_implement_handler() {
        let stub = ChaincodeStub::default();
        assert_eq!(Join.name(), "join");
        let payload = Join
            .call(&stub, vec!["a".into(), "b".into()])
            .await
            .unwrap();
        assert_eq!(payload, b"a,b");
    }
}

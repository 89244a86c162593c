#[cfg(test)]
pub mod mock {
    use crate::api::client::{register_mock, RawResponse, TestResponder};
    use crate::api::ApiError;
    use reqwest::Method;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub const GET: Method = Method::GET;
    pub const POST: Method = Method::POST;
    pub const PATCH: Method = Method::PATCH;
    pub const DELETE: Method = Method::DELETE;

    /// A request the mock received.
    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub method: Method,
        pub path: String,
        pub query: BTreeMap<String, String>,
        pub body: Option<Value>,
        pub authorization: Option<String>,
    }

    #[derive(Clone)]
    pub struct MockServer {
        inner: Rc<RefCell<Inner>>,
        base: String,
    }

    #[derive(Default)]
    struct Inner {
        routes: Vec<Route>,
        requests: Vec<Recorded>,
    }

    #[derive(Clone)]
    struct Route {
        method: Method,
        path: String,
        response: RawResponse,
    }

    impl MockServer {
        pub async fn start_async() -> Self {
            Self::start()
        }

        pub fn start() -> Self {
            static NEXT_ID: AtomicUsize = AtomicUsize::new(1);
            let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
            Self {
                inner: Rc::new(RefCell::new(Inner::default())),
                base: format!("http://mock-{}", id),
            }
        }

        pub fn url(&self, path: &str) -> String {
            let base_url = format!("{}{}", self.base, path);
            register_mock(self.base.clone(), Rc::new(self.clone()));
            base_url
        }

        pub fn mock<F>(&self, f: F)
        where
            F: FnOnce(&mut When, &mut Then),
        {
            let mut when = When::default();
            let mut then = Then::default();
            f(&mut when, &mut then);

            let method = when.method.clone().expect("mock requires method");
            let path = when.path.clone().expect("mock requires path");
            let body = then.body.unwrap_or_else(|| serde_json::json!({}));
            let response = RawResponse {
                status: then.status.unwrap_or(200),
                body: body.to_string(),
            };

            self.inner.borrow_mut().routes.push(Route {
                method,
                path,
                response,
            });
        }

        pub fn requests(&self) -> Vec<Recorded> {
            self.inner.borrow().requests.clone()
        }

        pub fn hits(&self, method: Method, path: &str) -> usize {
            self.inner
                .borrow()
                .requests
                .iter()
                .filter(|r| r.method == method && r.path == path)
                .count()
        }

        pub fn last_body(&self, method: Method, path: &str) -> Option<Value> {
            self.inner
                .borrow()
                .requests
                .iter()
                .rev()
                .find(|r| r.method == method && r.path == path)
                .and_then(|r| r.body.clone())
        }
    }

    impl TestResponder for MockServer {
        fn respond(&self, request: &reqwest::Request) -> Result<RawResponse, ApiError> {
            let method = request.method().clone();
            let path = request.url().path().to_string();
            let query = request
                .url()
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            let body = request
                .body()
                .and_then(|b| b.as_bytes())
                .and_then(|bytes| serde_json::from_slice(bytes).ok());
            let authorization = request
                .headers()
                .get(reqwest::header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let mut inner = self.inner.borrow_mut();
            inner.requests.push(Recorded {
                method: method.clone(),
                path: path.clone(),
                query,
                body,
                authorization,
            });

            inner
                .routes
                .iter()
                .rev()
                .find(|route| route.method == method && route.path == path)
                .map(|route| route.response.clone())
                .ok_or_else(|| ApiError::unknown(format!("No mock for {} {}", method, path)))
        }
    }

    #[derive(Default)]
    pub struct When {
        method: Option<Method>,
        path: Option<String>,
    }

    impl When {
        pub fn method(&mut self, method: Method) -> &mut Self {
            self.method = Some(method);
            self
        }

        pub fn path(&mut self, path: &str) -> &mut Self {
            self.path = Some(path.to_string());
            self
        }
    }

    #[derive(Default)]
    pub struct Then {
        status: Option<u16>,
        body: Option<Value>,
    }

    impl Then {
        pub fn status(&mut self, status: u16) -> &mut Self {
            self.status = Some(status);
            self
        }

        pub fn json_body(&mut self, body: Value) -> &mut Self {
            self.body = Some(body);
            self
        }
    }
}

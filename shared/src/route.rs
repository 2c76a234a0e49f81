use lambda_http::http::Method;

/// The six operations the users API exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CountUsers,
    ListUsers,
    GetUser,
    DeleteUser,
    CreateUser,
    UpdateUser,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::CountUsers,
        Route::ListUsers,
        Route::GetUser,
        Route::DeleteUser,
        Route::CreateUser,
        Route::UpdateUser,
    ];

    /// `"<METHOD> <resource template>"` as configured on the gateway
    pub fn key(self) -> &'static str {
        match self {
            Route::CountUsers => "GET /users/count",
            Route::ListUsers => "GET /users",
            Route::GetUser => "GET /users/{userid}",
            Route::DeleteUser => "DELETE /users/{userid}",
            Route::CreateUser => "POST /users",
            Route::UpdateUser => "PUT /users/{userid}",
        }
    }

    /// Exact match only; the template must be passed, not the resolved path
    pub fn resolve(route_key: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|route| route.key() == route_key)
    }
}

pub fn route_key(method: &Method, resource: &str) -> String {
    format!("{} {}", method, resource)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_resolves_to_itself() {
        for route in Route::ALL {
            assert_eq!(Route::resolve(route.key()), Some(route));
        }
    }

    #[test]
    fn test_route_key_uses_template() {
        assert_eq!(route_key(&Method::GET, "/users/{userid}"), "GET /users/{userid}");
        assert_eq!(Route::resolve(&route_key(&Method::GET, "/users/{userid}")), Some(Route::GetUser));
        assert_eq!(Route::resolve(&route_key(&Method::GET, "/users/abc")), None);
    }

    #[test]
    fn test_unmatched_keys() {
        assert_eq!(Route::resolve("PATCH /users/{userid}"), None);
        assert_eq!(Route::resolve("DELETE /users"), None);
        assert_eq!(Route::resolve("GET /users/"), None);
        assert_eq!(Route::resolve("get /users"), None);
        assert_eq!(Route::resolve(""), None);
    }
}

use url::form_urlencoded;
use url::Url;

/// Parameters an OIDC provider appends when redirecting back to the app.
pub const CALLBACK_PARAMS: [&str; 6] = [
    "code",
    "session_state",
    "state",
    "iss",
    "error",
    "access_token",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBootstrap {
    Redirect { target: String },
    Continue { cleaned_url: Option<Url> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Login { redirect_after: String },
}

pub fn is_returning_from_identity_provider(url: &Url) -> bool {
    has_callback_param(url.query()) || has_callback_param(url.fragment())
}

pub fn strip_callback_params(url: &Url) -> Url {
    let mut cleaned = url.clone();

    if has_callback_param(url.query()) {
        let kept = retained_pairs(url.query());
        cleaned.set_query(None);
        if !kept.is_empty() {
            cleaned.query_pairs_mut().extend_pairs(kept);
        }
    }

    if has_callback_param(url.fragment()) {
        let kept = retained_pairs(url.fragment());
        if kept.is_empty() {
            cleaned.set_fragment(None);
        } else {
            let fragment = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(kept)
                .finish();
            cleaned.set_fragment(Some(&fragment));
        }
    }

    cleaned
}

pub fn resolve_post_login_redirect(stored: Option<&str>, current: &str) -> Option<String> {
    let stored = stored.map(str::trim).filter(|value| !value.is_empty())?;
    if stored == current {
        return None;
    }
    Some(stored.to_string())
}

/// Decides what happens right after the identity provider initialised.
pub fn bootstrap_session(
    authenticated: bool,
    current_url: &Url,
    stored_redirect: Option<&str>,
) -> SessionBootstrap {
    if !authenticated {
        return SessionBootstrap::Continue { cleaned_url: None };
    }

    let cleaned_url = is_returning_from_identity_provider(current_url)
        .then(|| strip_callback_params(current_url));
    let effective = cleaned_url.as_ref().unwrap_or(current_url);

    if let Some(target) = resolve_post_login_redirect(stored_redirect, effective.as_str()) {
        return SessionBootstrap::Redirect { target };
    }

    SessionBootstrap::Continue { cleaned_url }
}

pub fn guard_route(requires_auth: bool, authenticated: bool, target: &Url) -> RouteDecision {
    if !requires_auth || authenticated {
        return RouteDecision::Allow;
    }
    RouteDecision::Login {
        redirect_after: target.to_string(),
    }
}

pub fn should_attach_bearer(request_url: &Url, app_origin: &Url) -> bool {
    request_url.origin() == app_origin.origin()
}

fn has_callback_param(raw: Option<&str>) -> bool {
    let Some(raw) = raw else {
        return false;
    };
    form_urlencoded::parse(raw.as_bytes()).any(|(key, _)| is_callback_param(&key))
}

fn is_callback_param(key: &str) -> bool {
    CALLBACK_PARAMS.iter().any(|param| *param == key)
}

fn retained_pairs(raw: Option<&str>) -> Vec<(String, String)> {
    form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
        .filter(|(key, _)| !is_callback_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

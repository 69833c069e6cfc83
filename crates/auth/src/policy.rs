//! Route authorization policy
//!
//! A static, ordered table of `(method, path pattern) -> requirement` rules.
//! The first rule whose method and pattern match the request wins; requests
//! that match no rule must be authenticated.

use axum::http::Method;

use crate::context::AuthContext;
use crate::error::AuthError;
use crate::types::Role;

/// Access requirement attached to a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Anyone, with or without a token
    Public,
    /// Any resolved identity
    Authenticated,
    /// Identity whose role equals the given role exactly
    Role(Role),
    /// The `{id}` path segment is the caller's own id, or the caller holds the role
    OwnerOrRole(Role),
}

/// HTTP method side of a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatcher {
    Any,
    /// A single method; `GET` also covers `HEAD`, which axum routes to GET handlers
    Only(Method),
}

impl MethodMatcher {
    fn matches(&self, method: &Method) -> bool {
        match self {
            MethodMatcher::Any => true,
            MethodMatcher::Only(m) if *m == Method::GET => {
                *method == Method::GET || *method == Method::HEAD
            }
            MethodMatcher::Only(m) => m == method,
        }
    }
}

impl From<Method> for MethodMatcher {
    fn from(method: Method) -> Self {
        MethodMatcher::Only(method)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(String),
    /// Trailing `**`: zero or more remaining segments
    Rest,
}

/// Path template such as `/api/jobs/{id}` or `/api/admin/**`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    template: String,
    segments: Vec<Segment>,
}

/// Values captured by `{name}` segments
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Captures(Vec<(String, String)>);

impl Captures {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn path_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

impl PathPattern {
    pub fn parse(template: &str) -> Self {
        let segments = path_segments(template)
            .map(|segment| {
                if segment == "**" {
                    Segment::Rest
                } else if let Some(name) = segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                {
                    Segment::Capture(name.to_string())
                } else {
                    Segment::Literal(segment.to_string())
                }
            })
            .collect();

        Self {
            template: template.to_string(),
            segments,
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Match a request path, returning the captured segments on success
    pub fn matches(&self, path: &str) -> Option<Captures> {
        let mut captures = Vec::new();
        let mut parts = path_segments(path);

        for segment in &self.segments {
            match segment {
                Segment::Rest => return Some(Captures(captures)),
                Segment::Literal(expected) => {
                    if parts.next()? != expected {
                        return None;
                    }
                }
                Segment::Capture(name) => {
                    let value = parts.next()?;
                    captures.push((name.clone(), value.to_string()));
                }
            }
        }

        match parts.next() {
            None => Some(Captures(captures)),
            Some(_) => None,
        }
    }
}

/// One immutable entry in the policy table
#[derive(Debug, Clone)]
pub struct Rule {
    pub method: MethodMatcher,
    pub pattern: PathPattern,
    pub requirement: Requirement,
}

impl Rule {
    pub fn new(method: impl Into<MethodMatcher>, template: &str, requirement: Requirement) -> Self {
        Self {
            method: method.into(),
            pattern: PathPattern::parse(template),
            requirement,
        }
    }

    /// Rule matching every HTTP method
    pub fn any(template: &str, requirement: Requirement) -> Self {
        Self::new(MethodMatcher::Any, template, requirement)
    }
}

/// Ordered rule table evaluated top-to-bottom, first match wins
#[derive(Debug, Clone)]
pub struct RoutePolicy {
    rules: Vec<Rule>,
}

impl RoutePolicy {
    /// Requirement applied when no rule matches
    pub const DEFAULT_REQUIREMENT: Requirement = Requirement::Authenticated;

    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// The job board's access table
    pub fn job_board() -> Self {
        use Requirement::{Authenticated, OwnerOrRole, Public};

        Self::new(vec![
            Rule::new(Method::GET, "/health", Public),
            Rule::new(Method::POST, "/api/auth/register", Public),
            Rule::new(Method::POST, "/api/auth/login", Public),
            Rule::new(Method::GET, "/api/jobs", Public),
            Rule::new(Method::GET, "/api/jobs/{id}", Public),
            Rule::new(Method::GET, "/api/categories", Public),
            Rule::new(Method::GET, "/api/categories/{id}", Public),
            Rule::any("/api/admin/**", Requirement::Role(Role::Admin)),
            Rule::new(Method::POST, "/api/jobs", Requirement::Role(Role::Employer)),
            Rule::new(Method::PUT, "/api/jobs/{id}", Requirement::Role(Role::Employer)),
            Rule::new(Method::DELETE, "/api/jobs/{id}", Requirement::Role(Role::Employer)),
            Rule::new(Method::POST, "/api/jobs/{id}/apply", Requirement::Role(Role::User)),
            Rule::new(Method::GET, "/api/applications", Requirement::Role(Role::User)),
            Rule::any("/api/users/me", Authenticated),
            Rule::new(Method::GET, "/api/users/{id}", OwnerOrRole(Role::Admin)),
            Rule::new(Method::PUT, "/api/users/{id}", OwnerOrRole(Role::Admin)),
        ])
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    fn find(&self, method: &Method, path: &str) -> Option<(&Rule, Captures)> {
        self.rules.iter().find_map(|rule| {
            if !rule.method.matches(method) {
                return None;
            }
            rule.pattern.matches(path).map(|captures| (rule, captures))
        })
    }

    /// Requirement that applies to a request
    pub fn requirement_for(&self, method: &Method, path: &str) -> Requirement {
        self.find(method, path)
            .map(|(rule, _)| rule.requirement)
            .unwrap_or(Self::DEFAULT_REQUIREMENT)
    }

    /// Decide whether a request may proceed.
    ///
    /// Missing identity on a protected route is `MissingAuthorization` (401);
    /// an identity that fails the role or ownership check is `Forbidden` (403).
    pub fn authorize(
        &self,
        method: &Method,
        path: &str,
        identity: Option<&AuthContext>,
    ) -> Result<(), AuthError> {
        let (requirement, captures) = match self.find(method, path) {
            Some((rule, captures)) => (rule.requirement, captures),
            None => (Self::DEFAULT_REQUIREMENT, Captures::default()),
        };

        if requirement == Requirement::Public {
            return Ok(());
        }

        let ctx = identity.ok_or(AuthError::MissingAuthorization)?;

        let allowed = match requirement {
            Requirement::Public | Requirement::Authenticated => true,
            Requirement::Role(role) => ctx.has_role(role),
            Requirement::OwnerOrRole(role) => {
                let is_owner = captures
                    .get("id")
                    .and_then(|id| id.parse::<i64>().ok())
                    .is_some_and(|id| ctx.is_self(id));
                is_owner || ctx.has_role(role)
            }
        };

        if allowed {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::job_board()
    }
}

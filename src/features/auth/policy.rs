/// Single source of truth for "may this role see cross-member data".
#[derive(Debug, Clone)]
pub struct PrivilegePolicy {
    privileged_roles: Vec<String>,
}

impl PrivilegePolicy {
    pub fn new<I, R>(roles: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: AsRef<str>,
    {
        Self {
            privileged_roles: roles
                .into_iter()
                .map(|r| r.as_ref().trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }

    pub fn is_privileged(&self, role: &str) -> bool {
        let role = role.trim();
        self.privileged_roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privileged_role_is_case_insensitive() {
        let policy = PrivilegePolicy::new(["ADMIN"]);
        assert!(policy.is_privileged("ADMIN"));
        assert!(policy.is_privileged("admin"));
        assert!(policy.is_privileged(" Admin "));
    }

    #[test]
    fn test_other_roles_are_not_privileged() {
        let policy = PrivilegePolicy::new(["ADMIN"]);
        assert!(!policy.is_privileged("COLIH"));
        assert!(!policy.is_privileged("GVT"));
        assert!(!policy.is_privileged(""));
    }

    #[test]
    fn test_multiple_privileged_roles() {
        let policy = PrivilegePolicy::new(vec!["ADMIN".to_string(), "GVP".to_string()]);
        assert!(policy.is_privileged("gvp"));
        assert!(!policy.is_privileged("member"));
    }

    #[test]
    fn test_empty_policy_privileges_nobody() {
        let policy = PrivilegePolicy::new(Vec::<String>::new());
        assert!(!policy.is_privileged("ADMIN"));
    }
}

use crate::env::Env;

pub const REPLIT_DEPLOYMENT: &str = "REPLIT_DEPLOYMENT";
pub const REPL_ID: &str = "REPL_ID";

/// Where the process is running, as far as the platform identity variables tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEnvironment {
    Local,
    HostedDevelopment,
    HostedProduction,
}

impl HostEnvironment {
    pub fn detect(env: &Env) -> Self {
        if env.contains(REPLIT_DEPLOYMENT) {
            HostEnvironment::HostedProduction
        } else if env.contains(REPL_ID) {
            HostEnvironment::HostedDevelopment
        } else {
            HostEnvironment::Local
        }
    }

    pub fn is_hosted_production(&self) -> bool {
        matches!(self, HostEnvironment::HostedProduction)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HostEnvironment::Local => "local",
            HostEnvironment::HostedDevelopment => "hosted_development",
            HostEnvironment::HostedProduction => "hosted_production",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deployment_wins_over_repl_id() {
        let env = Env::from_pairs([(REPLIT_DEPLOYMENT, "1"), (REPL_ID, "abc")]);
        assert_eq!(HostEnvironment::detect(&env), HostEnvironment::HostedProduction);

        let env = Env::from_pairs([(REPL_ID, "abc")]);
        assert_eq!(HostEnvironment::detect(&env), HostEnvironment::HostedDevelopment);

        assert_eq!(HostEnvironment::detect(&Env::new()), HostEnvironment::Local);
    }
}

//! Ready-made hardening policy bundles.

use crate::nonce::NonceGenerator;
use crate::policy::Policy;

impl Policy {
    /// Set reasonable hardening defaults and return the generated nonce for
    /// reuse in emitted markup.
    ///
    /// Scripts run only when tagged with the nonce; `'strict-dynamic'`
    /// extends that trust to scripts they load in turn.
    pub fn apply_moderate_defaults<G: NonceGenerator>(&mut self, nonce_source: &G) -> String {
        let nonce = self.apply_nonce_defaults(nonce_source);
        self.append_source("script-src", "'strict-dynamic'");
        nonce
    }

    /// Set locked-down defaults and return the generated nonce.
    ///
    /// Like the moderate defaults, but scripts load on nonce match alone.
    pub fn apply_secure_defaults<G: NonceGenerator>(&mut self, nonce_source: &G) -> String {
        self.apply_nonce_defaults(nonce_source)
    }

    /// Allow inline scripts as a fallback for browsers without nonce
    /// support. Nonce- and digest-aware browsers ignore `'unsafe-inline'`
    /// when either is present, so the weakening only reaches old ones.
    pub fn allow_old_browsers(&mut self) {
        self.append_source("script-src", "'unsafe-inline'");
    }

    fn apply_nonce_defaults<G: NonceGenerator>(&mut self, nonce_source: &G) -> String {
        let nonce = nonce_source.generate();
        self.set("default-src", ["'none'"]);
        self.set("connect-src", ["'self'"]);
        self.set("img-src", ["'self'"]);
        self.set("script-src", [format!("'nonce-{}'", nonce)]);
        self.set("object-src", ["'none'"]);
        self.set("base-uri", ["'none'"]);
        self.record_nonce(&nonce);
        nonce
    }
}

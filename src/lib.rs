//! Workspace root package. Hosts tooling only (pre-commit hooks via rusty-hook).

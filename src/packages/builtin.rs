use super::descriptor::{IgnoreFlags, LockFlags, ManagerDescriptor, OutputFlags, ScopeFlags};

// === Bun ===
pub const BUN: ManagerDescriptor = ManagerDescriptor {
    name: "bun",
    install: "bun install",
    add: "bun add",
    remove: "bun remove",
    update: "bun update",
    audit: "bun audit",
    run: "bun run",
    exec: "bunx",
    lock_flags: LockFlags {
        lock_only: "--lockfile-only",
        frozen_lockfile: "--frozen-lockfile",
    },
    ignore_flags: IgnoreFlags {
        scripts: "--ignore-scripts",
        engines: "",
        optional: "--omit optional",
        workspace_root_check: "",
        pnp: "",
    },
    scope_flags: ScopeFlags {
        production: "--production",
        dev: "--dev",
        peer: "--peer",
        optional: "--optional",
    },
    output_flags: OutputFlags {
        verbose: "--verbose",
        silent: "--silent",
    },
};

// === npm ===
pub const NPM: ManagerDescriptor = ManagerDescriptor {
    name: "npm",
    install: "npm install",
    add: "npm install",
    remove: "npm uninstall",
    update: "npm update",
    audit: "npm audit",
    run: "npm run",
    exec: "npx",
    lock_flags: LockFlags {
        lock_only: "--package-lock-only",
        frozen_lockfile: "",
    },
    ignore_flags: IgnoreFlags {
        scripts: "--ignore-scripts",
        engines: "",
        optional: "--omit=optional",
        workspace_root_check: "",
        pnp: "",
    },
    scope_flags: ScopeFlags {
        production: "--save-prod",
        dev: "--save-dev",
        peer: "--save-peer",
        optional: "--save-optional",
    },
    output_flags: OutputFlags {
        verbose: "--verbose",
        silent: "--silent",
    },
};

// === pnpm ===
pub const PNPM: ManagerDescriptor = ManagerDescriptor {
    name: "pnpm",
    install: "pnpm install",
    add: "pnpm add",
    remove: "pnpm remove",
    update: "pnpm update",
    audit: "pnpm audit",
    run: "pnpm run",
    exec: "pnpm dlx",
    lock_flags: LockFlags {
        lock_only: "--lockfile-only",
        frozen_lockfile: "--frozen-lockfile",
    },
    ignore_flags: IgnoreFlags {
        scripts: "--ignore-scripts",
        engines: "",
        optional: "--no-optional",
        workspace_root_check: "--ignore-workspace-root-check",
        pnp: "",
    },
    scope_flags: ScopeFlags {
        production: "--save-prod",
        dev: "--save-dev",
        peer: "--save-peer",
        optional: "--save-optional",
    },
    output_flags: OutputFlags {
        verbose: "--loglevel=debug",
        silent: "--silent",
    },
};

// === Yarn (classic) ===
// No lock-only mode, so yarn cannot be listed in alt-pms.
pub const YARN: ManagerDescriptor = ManagerDescriptor {
    name: "yarn",
    install: "yarn install",
    add: "yarn add",
    remove: "yarn remove",
    update: "yarn upgrade",
    audit: "yarn audit",
    run: "yarn run",
    exec: "yarn exec",
    lock_flags: LockFlags {
        lock_only: "",
        frozen_lockfile: "--frozen-lockfile",
    },
    ignore_flags: IgnoreFlags {
        scripts: "--ignore-scripts",
        engines: "--ignore-engines",
        optional: "--ignore-optional",
        workspace_root_check: "--ignore-workspace-root-check",
        pnp: "--disable-pnp",
    },
    scope_flags: ScopeFlags {
        production: "--production",
        dev: "--dev",
        peer: "--peer",
        optional: "--optional",
    },
    output_flags: OutputFlags {
        verbose: "--verbose",
        silent: "--silent",
    },
};

// === Deno ===
pub const DENO: ManagerDescriptor = ManagerDescriptor {
    name: "deno",
    install: "deno install",
    add: "deno add",
    remove: "deno remove",
    update: "deno outdated --update",
    audit: "",
    run: "deno task",
    exec: "deno run -A",
    lock_flags: LockFlags {
        lock_only: "",
        frozen_lockfile: "--frozen",
    },
    ignore_flags: IgnoreFlags {
        scripts: "",
        engines: "",
        optional: "",
        workspace_root_check: "",
        pnp: "",
    },
    scope_flags: ScopeFlags {
        production: "",
        dev: "--dev",
        peer: "",
        optional: "",
    },
    output_flags: OutputFlags {
        verbose: "--log-level=debug",
        silent: "--quiet",
    },
};

/// Get built-in manager descriptors, in registry order
pub fn get_builtin_managers() -> Vec<ManagerDescriptor> {
    vec![BUN, NPM, PNPM, YARN, DENO]
}

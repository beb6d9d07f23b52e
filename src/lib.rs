//! Workspace-level integration tests for fibdrv-rs live in `tests/`.

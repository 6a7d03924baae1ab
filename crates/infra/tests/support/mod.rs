//! Shared fixtures for infrastructure integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use atelier_infra::DbManager;
use rusqlite::params;
use tempfile::TempDir;

pub const SEED_TS: i64 = 1_700_000_000;

/// A migrated on-disk database that lives as long as the test.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    _temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir created");
        let db_path = temp_dir.path().join("atelier-test.db");
        let manager = DbManager::new(&db_path, 4).expect("manager created");
        manager.run_migrations().expect("migrations run");
        Self { manager: Arc::new(manager), _temp_dir: temp_dir }
    }

    pub fn execute_batch(&self, sql: &str) {
        let conn = self.manager.get_connection().expect("connection acquired");
        conn.execute_batch(sql).expect("batch executed");
    }

    pub fn query_i64(&self, sql: &str) -> i64 {
        let conn = self.manager.get_connection().expect("connection acquired");
        conn.query_row(sql, [], |row| row.get(0)).expect("scalar queried")
    }

    pub fn query_string(&self, sql: &str) -> String {
        let conn = self.manager.get_connection().expect("connection acquired");
        conn.query_row(sql, [], |row| row.get(0)).expect("scalar queried")
    }

    pub fn query_opt_i64(&self, sql: &str) -> Option<i64> {
        let conn = self.manager.get_connection().expect("connection acquired");
        conn.query_row(sql, [], |row| row.get(0)).expect("scalar queried")
    }
}

/// Seed the client, staff users, status catalog and one order.
///
/// Layout: `client-1` with portal user `user-client`; staff `user-admin`,
/// `user-manager`, `user-member`; statuses `status-new` (initial) and
/// `status-active`; `order-1` managed by `user-manager`.
pub fn seed_baseline(db: &TestDatabase) {
    db.execute_batch(&format!(
        "INSERT INTO clients (id, name, created_at) VALUES ('client-1', 'Acme GmbH', {ts});
         INSERT INTO clients (id, name, created_at) VALUES ('client-2', 'Globex AG', {ts});
         INSERT INTO users (id, name, role, client_id, created_at)
             VALUES ('user-admin', 'Alice', 'admin', NULL, {ts});
         INSERT INTO users (id, name, role, client_id, created_at)
             VALUES ('user-manager', 'Marta', 'manager', NULL, {ts});
         INSERT INTO users (id, name, role, client_id, created_at)
             VALUES ('user-member', 'Milo', 'member', NULL, {ts});
         INSERT INTO users (id, name, role, client_id, created_at)
             VALUES ('user-client', 'Carol', 'client', 'client-1', {ts});
         INSERT INTO order_statuses (id, name, position, is_initial)
             VALUES ('status-new', 'New', 0, 1);
         INSERT INTO order_statuses (id, name, position, is_initial)
             VALUES ('status-active', 'Active', 1, 0);
         INSERT INTO orders (id, number, title, priority, progress_percent, status_id,
                             client_id, manager_id, currency, estimated_budget, created_at, updated_at)
             VALUES ('order-1', 'ORD-2025-000', 'Launch site', 'medium', 0, 'status-active',
                     'client-1', 'user-manager', 'EUR', 2000000, {ts}, {ts});",
        ts = SEED_TS
    ));
}

pub fn insert_milestone(
    db: &TestDatabase,
    id: &str,
    order_id: &str,
    status: &str,
    requires_approval: bool,
    completed_at: Option<i64>,
) {
    let conn = db.manager.get_connection().expect("connection acquired");
    conn.execute(
        "INSERT INTO milestones (id, order_id, name, status, progress_percent,
             requires_approval, position, completed_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, 0, ?5, 0, ?6, ?7, ?7)",
        params![id, order_id, id, status, requires_approval as i64, completed_at, SEED_TS],
    )
    .expect("milestone inserted");
}

pub fn insert_task(
    db: &TestDatabase,
    id: &str,
    order_id: &str,
    milestone_id: Option<&str>,
    status: &str,
    assignee_id: Option<&str>,
) {
    let conn = db.manager.get_connection().expect("connection acquired");
    let completed_at = if status == "done" { Some(SEED_TS) } else { None };
    conn.execute(
        "INSERT INTO tasks (id, order_id, milestone_id, title, status, priority,
             assignee_id, completed_at, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 'medium', ?6, ?7, ?8, ?8)",
        params![id, order_id, milestone_id, id, status, assignee_id, completed_at, SEED_TS],
    )
    .expect("task inserted");
}

/// Insert a proposal with two priced items totalling 1,500,000 cents.
pub fn insert_proposal(db: &TestDatabase, id: &str, client_id: &str, status: &str) {
    let conn = db.manager.get_connection().expect("connection acquired");
    conn.execute(
        "INSERT INTO proposals (id, client_id, order_id, number, title, status,
             total_amount, currency, responded_at, created_at, updated_at)
         VALUES (?1, ?2, NULL, ?3, 'Website redesign', ?4, 1500000, 'EUR', NULL, ?5, ?5)",
        params![id, client_id, format!("PRO-2025-{id}"), status, SEED_TS],
    )
    .expect("proposal inserted");
    conn.execute(
        "INSERT INTO proposal_items (id, proposal_id, description, quantity, unit_price, total, position)
         VALUES (?1, ?2, 'Design phase', 1, 600000, 600000, 0)",
        params![format!("{id}-item-1"), id],
    )
    .expect("proposal item inserted");
    conn.execute(
        "INSERT INTO proposal_items (id, proposal_id, description, quantity, unit_price, total, position)
         VALUES (?1, ?2, 'Implementation', 3, 300000, 900000, 1)",
        params![format!("{id}-item-2"), id],
    )
    .expect("proposal item inserted");
}

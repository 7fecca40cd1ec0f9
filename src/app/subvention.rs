//! Subvention use cases: CRUD and aggregates over `subvenciones`.
//!
//! Every function acquires the connection for the duration of one statement.
//! Failures are logged here and returned to the caller.

use crate::domain::Subvention;
use crate::error::AppError;
use crate::infra::DbPool;
use rusqlite::types::{Type, ValueRef};
use rusqlite::{params, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

const SELECT_COLUMNS: &str =
    "SELECT id_subvencion, pais_asignado, tipo_subvencion, importe FROM subvenciones";

fn log_failure(op: &str, err: &AppError) {
    if err.is_not_found() {
        log::warn!("{}: {}", op, err);
    } else {
        log::error!("{} failed: {}", op, err);
    }
}

/// Reads `importe`. Rows written by this application hold decimal text;
/// numeric values written by other tools are accepted too.
fn amount_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    match row.get_ref(idx)? {
        ValueRef::Text(bytes) => {
            let text = std::str::from_utf8(bytes).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })?;
            Decimal::from_str(text.trim()).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
            })
        }
        ValueRef::Integer(i) => Ok(Decimal::from(i)),
        ValueRef::Real(f) => Decimal::try_from(f)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Real, Box::new(e))),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "importe".into(),
            other.data_type(),
        )),
    }
}

fn map_row(row: &Row<'_>) -> rusqlite::Result<Subvention> {
    Ok(Subvention {
        id: Some(row.get(0)?),
        country: row.get(1)?,
        subsidy_type: row.get(2)?,
        amount: amount_at(row, 3)?,
    })
}

fn check_fields(record: &Subvention) -> Result<(), AppError> {
    if record.country.trim().is_empty() {
        return Err(AppError::Validation("country is required".into()));
    }
    if record.subsidy_type.trim().is_empty() {
        return Err(AppError::Validation("subsidy type is required".into()));
    }
    Ok(())
}

/// Insert `record` and write the generated id back into it.
pub fn subvention_insert(pool: &DbPool, record: &mut Subvention) -> Result<i64, AppError> {
    let result = (|| -> Result<i64, AppError> {
        if let Some(id) = record.id {
            return Err(AppError::Validation(format!(
                "subvention {} is already persisted",
                id
            )));
        }
        check_fields(record)?;
        let conn = pool.acquire()?;
        conn.execute(
            "INSERT INTO subvenciones (pais_asignado, tipo_subvencion, importe) VALUES (?1, ?2, ?3)",
            params![record.country, record.subsidy_type, record.amount.to_string()],
        )?;
        Ok(conn.last_insert_rowid())
    })();

    match result {
        Ok(id) => {
            record.id = Some(id);
            log::info!("Subvention inserted: id={}", id);
            Ok(id)
        }
        Err(e) => {
            log_failure("insert subvention", &e);
            Err(e)
        }
    }
}

/// Overwrite the row matching `record.id`. Zero matched rows is `NotFound`.
pub fn subvention_update(pool: &DbPool, record: &Subvention) -> Result<(), AppError> {
    let result = (|| -> Result<i64, AppError> {
        let id = record
            .id
            .ok_or_else(|| AppError::Validation("id is required for update".into()))?;
        check_fields(record)?;
        let conn = pool.acquire()?;
        let affected = conn.execute(
            "UPDATE subvenciones SET pais_asignado = ?1, tipo_subvencion = ?2, importe = ?3 WHERE id_subvencion = ?4",
            params![
                record.country,
                record.subsidy_type,
                record.amount.to_string(),
                id
            ],
        )?;
        match affected {
            0 => Err(AppError::NotFound(format!("subvention {}", id))),
            _ => Ok(id),
        }
    })();

    match result {
        Ok(id) => {
            log::info!("Subvention updated: id={}", id);
            Ok(())
        }
        Err(e) => {
            log_failure("update subvention", &e);
            Err(e)
        }
    }
}

/// Delete the row with `id`. Zero matched rows is `NotFound`.
pub fn subvention_delete(pool: &DbPool, id: i64) -> Result<(), AppError> {
    let result = pool.acquire().and_then(|conn| {
        let affected = conn.execute("DELETE FROM subvenciones WHERE id_subvencion = ?1", [id])?;
        match affected {
            0 => Err(AppError::NotFound(format!("subvention {}", id))),
            _ => Ok(()),
        }
    });

    match result {
        Ok(()) => {
            log::info!("Subvention deleted: id={}", id);
            Ok(())
        }
        Err(e) => {
            log_failure("delete subvention", &e);
            Err(e)
        }
    }
}

/// All rows, ascending id. An empty table is `Ok(vec![])`; a read error is `Err`.
pub fn subvention_find_all(pool: &DbPool) -> Result<Vec<Subvention>, AppError> {
    let result = pool.acquire().and_then(|conn| {
        let mut stmt = conn.prepare(&format!("{} ORDER BY id_subvencion", SELECT_COLUMNS))?;
        let rows = stmt.query_map([], map_row)?;
        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    });

    match result {
        Ok(list) => {
            log::debug!("Subventions loaded: {}", list.len());
            Ok(list)
        }
        Err(e) => {
            log_failure("list subventions", &e);
            Err(e)
        }
    }
}

pub fn subvention_find_by_id(pool: &DbPool, id: i64) -> Result<Subvention, AppError> {
    let result = pool.acquire().and_then(|conn| {
        let found = conn
            .query_row(
                &format!("{} WHERE id_subvencion = ?1", SELECT_COLUMNS),
                [id],
                map_row,
            )
            .optional()?;
        found.ok_or_else(|| AppError::NotFound(format!("subvention {}", id)))
    });

    if let Err(e) = &result {
        log_failure("find subvention", e);
    }
    result
}

pub fn subvention_count(pool: &DbPool) -> Result<i64, AppError> {
    let result = pool.acquire().and_then(|conn| {
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM subvenciones", [], |r| r.get(0))?;
        Ok(count)
    });

    if let Err(e) = &result {
        log_failure("count subventions", e);
    }
    result
}

/// Exact sum of every `importe`; zero for an empty table.
///
/// Summed in `Decimal` rather than with SQL `SUM`, which goes through `REAL`.
pub fn subvention_sum_amount(pool: &DbPool) -> Result<Decimal, AppError> {
    let result = pool.acquire().and_then(|conn| {
        let mut stmt = conn.prepare("SELECT importe FROM subvenciones")?;
        let amounts = stmt.query_map([], |row| amount_at(row, 0))?;
        let mut total = Decimal::ZERO;
        for amount in amounts {
            total = total
                .checked_add(amount?)
                .ok_or_else(|| AppError::Db("amount sum overflows".into()))?;
        }
        Ok(total)
    });

    if let Err(e) = &result {
        log_failure("sum subvention amounts", e);
    }
    result
}

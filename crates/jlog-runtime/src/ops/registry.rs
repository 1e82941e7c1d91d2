use jlog_index::Database;
use jlog_types::program_name_from_folder;
use std::path::Path;
use tracing::{info, warn};

use crate::Result;
use crate::fs::list_subdirectories;

/// Register every folder under `log_root` that storage does not know yet.
///
/// Folder paths are stored absolute so the same folder keeps one key however
/// the root is spelled. Returns the number of programs inserted. A folder
/// whose insert fails is logged and skipped; failing to read known paths or
/// to walk the root is returned as an error.
pub fn sync_programs(db: &Database, log_root: &Path) -> Result<usize> {
    let known = db.list_known_program_paths()?;
    let folders = list_subdirectories(&std::path::absolute(log_root)?)?;

    let mut inserted = 0;
    for folder in folders {
        let path = folder.to_string_lossy().to_string();
        if known.contains(&path) {
            continue;
        }

        let name = program_name_from_folder(&folder);
        match db.insert_program(&name, &path) {
            Ok(program_id) => {
                info!(program_id = %program_id, path = %path, "registered program {}", name);
                inserted += 1;
            }
            Err(err) => warn!(path = %path, "failed to register program: {}", err),
        }
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sync_registers_new_folders_once() -> Result<()> {
        let root = TempDir::new()?;
        std::fs::create_dir(root.path().join("Sync-Users"))?;
        std::fs::create_dir(root.path().join("Backup-Db"))?;
        let db = Database::open_in_memory()?;

        assert_eq!(sync_programs(&db, root.path())?, 2);
        assert_eq!(sync_programs(&db, root.path())?, 0);

        let names: Vec<String> = db.list_programs()?.into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Backup-Db", "Sync-Users"]);

        Ok(())
    }

    #[test]
    fn test_sync_only_inserts_unknown_folder() -> Result<()> {
        let root = TempDir::new()?;
        let known = root.path().join("known");
        std::fs::create_dir(&known)?;
        std::fs::create_dir(root.path().join("fresh"))?;

        let db = Database::open_in_memory()?;
        db.insert_program("known", &known.to_string_lossy())?;

        assert_eq!(sync_programs(&db, root.path())?, 1);
        let programs = db.list_programs()?;
        assert_eq!(programs.len(), 2);
        assert_eq!(programs[1].name, "fresh");

        Ok(())
    }

    #[test]
    fn test_sync_includes_nested_folders() -> Result<()> {
        let root = TempDir::new()?;
        std::fs::create_dir_all(root.path().join("team/nightly"))?;
        let db = Database::open_in_memory()?;

        assert_eq!(sync_programs(&db, root.path())?, 2);
        assert!(
            db.list_known_program_paths()?
                .contains(&root.path().join("team/nightly").to_string_lossy().to_string())
        );

        Ok(())
    }

    #[test]
    fn test_sync_same_root_spelled_differently() -> Result<()> {
        let root = TempDir::new()?;
        std::fs::create_dir(root.path().join("app"))?;
        let db = Database::open_in_memory()?;

        assert_eq!(sync_programs(&db, root.path())?, 1);
        assert_eq!(sync_programs(&db, &root.path().join("."))?, 0);

        Ok(())
    }

    #[test]
    fn test_sync_missing_root_is_fatal() -> Result<()> {
        let root = TempDir::new()?;
        let db = Database::open_in_memory()?;

        assert!(sync_programs(&db, &root.path().join("absent")).is_err());
        Ok(())
    }
}

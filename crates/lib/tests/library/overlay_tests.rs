//! Directory overlay copies on real trees.

use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use trimbuild_lib::consts::MAX_OVERLAY_FILE_SIZE;
use trimbuild_lib::overlay::{CopyError, CopyOptions, copy_dirs};
use trimbuild_lib::paths::mirror_under;

use super::common::mode;

struct Fixture {
  _temp: TempDir,
  src: PathBuf,
  dest: PathBuf,
}

impl Fixture {
  fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let base = dunce::canonicalize(temp.path()).unwrap();
    let src = base.join("src").join("app");
    fs::create_dir_all(src.join("pkg").join("util")).unwrap();
    fs::write(src.join("main.go"), "package main\n").unwrap();
    fs::write(src.join("pkg").join("util").join("util.go"), "package util\n").unwrap();
    Self {
      _temp: temp,
      src,
      dest: base.join("overlay"),
    }
  }

  fn mirrored(&self, src: &Path) -> PathBuf {
    mirror_under(&self.dest, src)
  }
}

mod mirroring {
  use super::*;

  #[test]
  fn copies_tree_under_mirrored_path() {
    let fx = Fixture::new();

    copy_dirs(&[fx.src.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    let mirror = fx.mirrored(&fx.src);
    assert_eq!(fs::read_to_string(mirror.join("main.go")).unwrap(), "package main\n");
    assert!(mirror.join("pkg").join("util").join("util.go").exists());
  }

  #[test]
  fn permissions_opened_up() {
    let fx = Fixture::new();
    let file = fx.src.join("main.go");
    fs::set_permissions(&file, fs::Permissions::from_mode(0o600)).unwrap();

    copy_dirs(&[fx.src.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    let mirror = fx.mirrored(&fx.src);
    assert_eq!(mode(&mirror), 0o777);
    assert_eq!(mode(&mirror.join("main.go")), 0o777);
    assert_eq!(mode(&mirror.join("pkg").join("util").join("util.go")), 0o777);
  }

  #[test]
  fn multiple_sources() {
    let fx = Fixture::new();
    let other = fx.src.parent().unwrap().join("lib");
    fs::create_dir_all(&other).unwrap();
    fs::write(other.join("lib.go"), "package lib\n").unwrap();

    copy_dirs(&[fx.src.clone(), other.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    assert!(fx.mirrored(&fx.src).join("main.go").exists());
    assert!(fx.mirrored(&other).join("lib.go").exists());
  }

  #[test]
  fn stale_overlay_content_removed() {
    let fx = Fixture::new();
    fs::create_dir_all(&fx.dest).unwrap();
    fs::write(fx.dest.join("stale.txt"), "old").unwrap();

    copy_dirs(&[fx.src.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    assert!(!fx.dest.join("stale.txt").exists());
    assert!(fx.mirrored(&fx.src).join("main.go").exists());
  }

  #[test]
  fn paths_with_spaces_and_quotes() {
    let fx = Fixture::new();
    let odd = fx.src.parent().unwrap().join("it's a dir");
    fs::create_dir_all(&odd).unwrap();
    fs::write(odd.join("file $name.go"), "x").unwrap();

    copy_dirs(&[odd.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    assert!(fx.mirrored(&odd).join("file $name.go").exists());
  }

  #[test]
  fn non_utf8_names_copied_byte_for_byte() {
    let fx = Fixture::new();
    let raw = OsStr::from_bytes(b"caf\xe9.go");
    fs::write(fx.src.join(raw), "package main\n").unwrap();

    copy_dirs(&[fx.src.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    let mirror = fx.mirrored(&fx.src);
    assert!(mirror.join("main.go").exists());
    assert!(mirror.join(raw).exists());
    assert_eq!(fs::read_dir(&mirror).unwrap().count(), 3);
  }

  #[test]
  fn non_utf8_source_directory() {
    let fx = Fixture::new();
    let odd = fx.src.parent().unwrap().join(OsStr::from_bytes(b"d\xe9p"));
    fs::create_dir_all(&odd).unwrap();
    fs::write(odd.join("dep.go"), "package dep\n").unwrap();

    copy_dirs(&[odd.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    assert!(fx.mirrored(&odd).join("dep.go").exists());
  }
}

mod filtering {
  use super::*;

  #[test]
  fn oversized_files_left_out() {
    let fx = Fixture::new();
    let big = fs::File::create(fx.src.join("big.bin")).unwrap();
    big.set_len(MAX_OVERLAY_FILE_SIZE + 1).unwrap();
    fs::write(fx.src.join("small.txt"), "small").unwrap();

    copy_dirs(&[fx.src.clone()], &fx.dest, &CopyOptions::default()).unwrap();

    let mirror = fx.mirrored(&fx.src);
    assert!(mirror.join("small.txt").exists());
    assert!(!mirror.join("big.bin").exists());
  }

  #[test]
  fn nested_files_not_size_filtered() {
    let fx = Fixture::new();
    fs::write(fx.src.join("pkg").join("blob.bin"), vec![1u8; 128]).unwrap();
    let options = CopyOptions {
      max_file_size: 64,
      ..Default::default()
    };

    copy_dirs(&[fx.src.clone()], &fx.dest, &options).unwrap();

    assert!(fx.mirrored(&fx.src).join("pkg").join("blob.bin").exists());
  }

  #[test]
  fn ignored_names_absent() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.src.join(".git").join("objects")).unwrap();
    fs::write(fx.src.join("go.sum"), "").unwrap();
    let options = CopyOptions {
      ignore_names: vec![".git".to_string(), "go.sum".to_string()],
      ..Default::default()
    };

    copy_dirs(&[fx.src.clone()], &fx.dest, &options).unwrap();

    let mirror = fx.mirrored(&fx.src);
    assert!(!mirror.join(".git").exists());
    assert!(!mirror.join("go.sum").exists());
    assert!(mirror.join("main.go").exists());
  }

  #[test]
  fn source_with_nothing_left_is_skipped() {
    let fx = Fixture::new();
    let only_ignored = fx.src.parent().unwrap().join("vendor");
    fs::create_dir_all(only_ignored.join("modules.txt")).unwrap();
    let options = CopyOptions {
      ignore_names: vec!["modules.txt".to_string()],
      ..Default::default()
    };

    copy_dirs(&[fx.src.clone(), only_ignored.clone()], &fx.dest, &options).unwrap();

    assert!(!fx.mirrored(&only_ignored).exists());
  }

  #[test]
  fn destination_root_recreated_when_everything_is_filtered() {
    let fx = Fixture::new();
    let only_git = fx.src.parent().unwrap().join("bare");
    fs::create_dir_all(only_git.join(".git")).unwrap();
    fs::create_dir_all(&fx.dest).unwrap();
    fs::write(fx.dest.join("stale.txt"), "old").unwrap();
    let options = CopyOptions {
      ignore_names: vec![".git".to_string()],
      ..Default::default()
    };

    copy_dirs(&[only_git.clone()], &fx.dest, &options).unwrap();

    assert!(fx.dest.is_dir());
    assert_eq!(fs::read_dir(&fx.dest).unwrap().count(), 0);
  }

  #[test]
  fn destination_transform_can_skip_or_relocate() {
    let fx = Fixture::new();
    let module = fx.src.parent().unwrap().join("dep@v1.0.0");
    fs::create_dir_all(&module).unwrap();
    fs::write(module.join("dep.go"), "package dep\n").unwrap();
    let app_mirror = fx.mirrored(&fx.src);

    let skip = app_mirror.clone();
    let options = CopyOptions {
      process_dest: Some(Box::new(move |dest: &Path| {
        if dest == skip {
          return Some(PathBuf::new());
        }
        Some(PathBuf::from(dest.to_string_lossy().replace('@', "/")))
      })),
      ..Default::default()
    };

    copy_dirs(&[fx.src.clone(), module.clone()], &fx.dest, &options).unwrap();

    assert!(!app_mirror.exists());
    let relocated = PathBuf::from(fx.mirrored(&module).to_string_lossy().replace('@', "/"));
    assert!(relocated.join("dep.go").exists());
  }
}

mod errors {
  use super::*;

  #[test]
  fn empty_sources_touch_nothing() {
    let fx = Fixture::new();

    let err = copy_dirs(&[], &fx.dest, &CopyOptions::default()).unwrap_err();

    assert!(matches!(err, CopyError::EmptySources));
    assert!(!fx.dest.exists());
  }

  #[test]
  fn filesystem_root_rejected() {
    let fx = Fixture::new();

    let err = copy_dirs(&[fx.src.clone()], Path::new("/"), &CopyOptions::default()).unwrap_err();

    assert!(matches!(err, CopyError::DestRootIsFsRoot));
  }

  #[test]
  fn unreadable_source_aborts_before_removal() {
    let fx = Fixture::new();
    fs::create_dir_all(&fx.dest).unwrap();
    fs::write(fx.dest.join("keep.txt"), "previous overlay").unwrap();
    let missing = fx.src.parent().unwrap().join("missing");

    let err = copy_dirs(&[fx.src.clone(), missing], &fx.dest, &CopyOptions::default()).unwrap_err();

    assert!(matches!(err, CopyError::ListDir { .. }));
    assert!(fx.dest.join("keep.txt").exists());
  }
}

use clap::Parser;
use hashcalc::engine::{Cli, NameFilter, build_opts, digest_file_name, glob_match, hex_u64, run_cli};
use hashcalc::utils::config::ChannelCap;
use hashcalc::utils::{WorkerThreadLimits, apply_file_to_opts, parse_hashcalc_toml};
use hashcalc::{HashAlgorithm, HashError, Opts, hash_file, lookup};
use std::fs;
use std::path::{Path, PathBuf};

// --- glob_match / NameFilter ---

#[test]
fn test_glob_match_literal() {
    assert!(glob_match("photo.jpg", "photo.jpg"));
    assert!(!glob_match("photo.jpg", "photo.jpeg"));
}

#[test]
fn test_glob_match_star() {
    assert!(glob_match("*", "anything.bin"));
    assert!(glob_match("*", ".hidden"));
    assert!(glob_match("*.jpg", "a.jpg"));
    assert!(!glob_match("*.jpg", "a.png"));
    assert!(!glob_match("*.jpg", "a.jpg.bak"));
}

#[test]
fn test_glob_match_question_and_class() {
    assert!(glob_match("img_?.png", "img_1.png"));
    assert!(!glob_match("img_?.png", "img_10.png"));
    assert!(glob_match("[ab].txt", "a.txt"));
    assert!(!glob_match("[ab].txt", "c.txt"));
}

#[test]
fn test_glob_match_is_case_sensitive() {
    assert!(!glob_match("*.JPG", "a.jpg"));
}

#[test]
fn test_malformed_pattern_never_matches() {
    let filter = NameFilter::new("[");
    assert!(!filter.is_valid());
    assert!(!filter.matches_name("["));
    assert!(!filter.matches_name("a.txt"));
    assert!(!glob_match("***[", "anything"));
}

#[test]
fn test_name_filter_uses_file_name_only() {
    let filter = NameFilter::new("*.txt");
    assert!(filter.matches_path(&PathBuf::from("deep/dir.jpg/a.txt")));
    assert!(!filter.matches_path(&PathBuf::from("dir.txt/a.jpg")));
}

// --- digest_file_name ---

#[test]
fn test_digest_file_name_keeps_extension_and_dir() {
    let p = PathBuf::from("photos/2024/IMG_0001.jpg");
    assert_eq!(
        digest_file_name(&p, "abc123"),
        PathBuf::from("photos/2024/abc123.jpg")
    );
}

#[test]
fn test_digest_file_name_no_extension() {
    assert_eq!(
        digest_file_name(&PathBuf::from("dir/README"), "ff00"),
        PathBuf::from("dir/ff00")
    );
}

#[test]
fn test_digest_file_name_last_extension_only() {
    assert_eq!(
        digest_file_name(&PathBuf::from("a.tar.gz"), "d1"),
        PathBuf::from("d1.gz")
    );
}

// --- registry ---

#[test]
fn test_lookup_every_registered_name() {
    for alg in HashAlgorithm::ALL {
        let hasher = lookup(alg.name()).unwrap();
        assert_eq!(hasher.algorithm(), alg);
    }
}

#[test]
fn test_lookup_is_case_insensitive() {
    assert_eq!(lookup("sha256").unwrap().algorithm(), HashAlgorithm::Sha256);
    assert_eq!(lookup("Blake3").unwrap().algorithm(), HashAlgorithm::Blake3);
    assert_eq!(lookup("xxhash64").unwrap().algorithm(), HashAlgorithm::XxHash64);
}

#[test]
fn test_lookup_unknown_names_identifier() {
    let err = lookup("CRC32").unwrap_err();
    assert!(matches!(err, HashError::UnsupportedAlgorithm(ref id) if id == "CRC32"));
    assert!(err.is_fatal());
    assert!(err.to_string().contains("CRC32"));
}

#[test]
fn test_default_algorithm_is_md5() {
    assert_eq!(HashAlgorithm::default(), HashAlgorithm::Md5);
    assert_eq!(HashAlgorithm::Md5.to_string(), "MD5");
}

// --- hex_u64 ---

#[test]
fn test_hex_u64_is_not_zero_padded() {
    assert_eq!(hex_u64(0x0abc), "abc");
    assert_eq!(hex_u64(0), "0");
    assert_eq!(hex_u64(u64::MAX), "ffffffffffffffff");
}

// --- worker limits / channel cap ---

#[test]
fn test_worker_limits_override_wins() {
    let limits = WorkerThreadLimits {
        all_threads: 16,
        fd_cap: Some(4),
    };
    assert_eq!(limits.resolve(Some(8)), 8);
    assert_eq!(limits.resolve(Some(1)), 1);
}

#[test]
fn test_worker_limits_default_capped_by_fd() {
    let limits = WorkerThreadLimits {
        all_threads: 16,
        fd_cap: Some(4),
    };
    assert_eq!(limits.resolve(None), 4);
    let uncapped = WorkerThreadLimits {
        all_threads: 6,
        fd_cap: None,
    };
    assert_eq!(uncapped.resolve(None), 6);
}

#[test]
fn test_worker_limits_never_zero() {
    let limits = WorkerThreadLimits {
        all_threads: 0,
        fd_cap: None,
    };
    assert_eq!(limits.resolve(None), 1);
    assert_eq!(limits.resolve(Some(0)), 1);
}

#[test]
fn test_worker_limits_clamp_huge_requests() {
    let limits = WorkerThreadLimits {
        all_threads: 8,
        fd_cap: None,
    };
    assert_eq!(limits.resolve(Some(100_000)), WorkerThreadLimits::MAX_THREADS);
    assert_eq!(limits.resolve(Some(usize::MAX)), WorkerThreadLimits::MAX_THREADS);
    let many_cores = WorkerThreadLimits {
        all_threads: 10_000,
        fd_cap: None,
    };
    assert_eq!(many_cores.resolve(None), WorkerThreadLimits::MAX_THREADS);
}

#[test]
fn test_channel_cap_has_floor() {
    assert_eq!(ChannelCap::for_workers(1), ChannelCap::MIN);
    assert_eq!(ChannelCap::for_workers(100), 100 * ChannelCap::PER_WORKER);
}

#[test]
fn test_channel_cap_has_ceiling() {
    assert_eq!(ChannelCap::for_workers(100_000), ChannelCap::MAX);
    assert_eq!(ChannelCap::for_workers(usize::MAX / 32), ChannelCap::MAX);
    assert_eq!(ChannelCap::for_workers(usize::MAX), ChannelCap::MAX);
}

// --- settings file ---

#[test]
fn test_settings_file_applies_present_fields() {
    let file = parse_hashcalc_toml(
        r#"
        [settings]
        hash = "sha1"
        file_pattern = "*.jpg"
        workers = 3
        rename = true
        "#,
    )
    .unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts).unwrap();
    assert_eq!(opts.algorithm, HashAlgorithm::Sha1);
    assert_eq!(opts.file_pattern, "*.jpg");
    assert_eq!(opts.num_workers, Some(3));
    assert!(opts.rename);
    assert!(opts.display);
    assert!(opts.out_file.is_none());
}

#[test]
fn test_settings_file_unknown_hash_is_error() {
    let file = parse_hashcalc_toml("[settings]\nhash = \"md4\"\n").unwrap();
    let mut opts = Opts::default();
    assert!(apply_file_to_opts(&file, &mut opts).is_err());
}

#[test]
fn test_settings_file_rejects_unknown_keys() {
    assert!(parse_hashcalc_toml("[settings]\nhashes = \"md5\"\n").is_err());
}

#[test]
fn test_settings_file_empty() {
    let file = parse_hashcalc_toml("").unwrap();
    let mut opts = Opts::default();
    apply_file_to_opts(&file, &mut opts).unwrap();
    assert_eq!(opts.file_pattern, "*");
}

// --- CLI ---

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["hashcalc"]).unwrap();
    assert_eq!(cli.dir, PathBuf::from("."));
    assert!(cli.hash.is_none());
    assert!(cli.workers.is_none());
    assert!(cli.rename.is_none());
}

#[test]
fn test_cli_flags() {
    let cli = Cli::try_parse_from([
        "hashcalc",
        "some/dir",
        "--hash",
        "BLAKE3",
        "-p",
        "*.png",
        "-w",
        "4",
        "--rename",
        "--display",
        "false",
    ])
    .unwrap();
    assert_eq!(cli.dir, PathBuf::from("some/dir"));
    assert_eq!(cli.hash.as_deref(), Some("BLAKE3"));
    assert_eq!(cli.file_pattern.as_deref(), Some("*.png"));
    assert_eq!(cli.workers, Some(4));
    assert_eq!(cli.rename, Some(true));
    assert_eq!(cli.display, Some(false));
}

#[test]
fn test_cli_rejects_zero_workers() {
    assert!(Cli::try_parse_from(["hashcalc", "-w", "0"]).is_err());
}

// --- CLI runs ---

fn cli(args: &[&str]) -> Cli {
    let mut argv = vec!["hashcalc"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

fn dir_arg(dir: &Path) -> &str {
    dir.to_str().unwrap()
}

#[test]
fn test_build_opts_defaults_without_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let opts = build_opts(&cli(&[dir_arg(dir.path())])).unwrap();
    assert_eq!(opts.algorithm, HashAlgorithm::Md5);
    assert_eq!(opts.file_pattern, "*");
    assert!(opts.num_workers.is_none());
    assert!(!opts.rename);
    assert!(opts.prints_to_console());
}

#[test]
fn test_build_opts_flags_override_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".hashcalc.toml"),
        "[settings]\nhash = \"sha1\"\nfile_pattern = \"*.jpg\"\nworkers = 3\ndisplay = false\n",
    )
    .unwrap();

    let from_file = build_opts(&cli(&[dir_arg(dir.path())])).unwrap();
    assert_eq!(from_file.algorithm, HashAlgorithm::Sha1);
    assert_eq!(from_file.file_pattern, "*.jpg");
    assert_eq!(from_file.num_workers, Some(3));
    assert!(!from_file.display);

    let overridden = build_opts(&cli(&[
        dir_arg(dir.path()),
        "--hash",
        "sha256",
        "-w",
        "5",
        "--display",
        "true",
    ]))
    .unwrap();
    assert_eq!(overridden.algorithm, HashAlgorithm::Sha256);
    assert_eq!(overridden.file_pattern, "*.jpg");
    assert_eq!(overridden.num_workers, Some(5));
    assert!(overridden.display);
}

#[test]
fn test_out_file_suppresses_console_output() {
    let dir = tempfile::tempdir().unwrap();
    let opts = build_opts(&cli(&[dir_arg(dir.path()), "-o", "digests.txt"])).unwrap();
    assert!(opts.display);
    assert!(!opts.prints_to_console());

    let quiet = build_opts(&cli(&[dir_arg(dir.path()), "--display", "false"])).unwrap();
    assert!(!quiet.prints_to_console());
}

#[test]
fn test_unknown_hash_fails_before_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a.txt");
    fs::write(&p, "hi").unwrap();

    let err = run_cli(&cli(&[dir_arg(dir.path()), "--hash", "crc32", "--rename"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<HashError>(),
        Some(HashError::UnsupportedAlgorithm(id)) if id == "crc32"
    ));
    // Nothing was renamed: the walk never started.
    assert!(p.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_run_cli_rename_and_out_file() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("photo.jpg");
    fs::write(&p, "hi").unwrap();
    let out = out_dir.path().join("digests.txt");

    let status = run_cli(&cli(&[
        dir_arg(dir.path()),
        "--rename",
        "-o",
        out.to_str().unwrap(),
    ]))
    .unwrap();
    assert!(status.succeeded(), "{:?}", status.report.errors);

    let target = dir.path().join("49f68a5c8493ec2c0bf489821c21fc3b.jpg");
    assert!(!p.exists());
    assert_eq!(fs::read_to_string(&target).unwrap(), "hi");
    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 1);
    assert!(written.ends_with("49f68a5c8493ec2c0bf489821c21fc3b\n"));
}

#[test]
fn test_run_cli_rename_collision_keeps_original_and_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    fs::write(&a, "hi").unwrap();
    fs::write(&b, "hi").unwrap();
    fs::write(dir.path().join("c.jpg"), "untouched").unwrap();
    let out = out_dir.path().join("digests.txt");
    let digest = hash_file(&a, HashAlgorithm::Md5).unwrap();

    let status = run_cli(&cli(&[
        dir_arg(dir.path()),
        "-p",
        "*.txt",
        "--rename",
        "-o",
        out.to_str().unwrap(),
    ]))
    .unwrap();

    assert!(!status.succeeded());
    assert!(status.output_written);
    assert!(!status.cancelled);
    assert_eq!(status.report.digests.len(), 2);
    assert_eq!(status.report.errors.len(), 1);
    let target = dir.path().join(format!("{digest}.txt"));
    assert!(matches!(
        &status.report.errors[0].1,
        HashError::AlreadyExists(t) if *t == target
    ));

    // One file took the digest name, the other kept its own.
    assert!(target.exists());
    assert!(a.exists() != b.exists());
    assert!(dir.path().join("c.jpg").exists());
    assert_eq!(fs::read_to_string(&out).unwrap().lines().count(), 2);
}

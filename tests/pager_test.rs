use std::fs;

use lontar::{
    storage::pager::Pager,
    types::{PAGE_SIZE, TABLE_MAX_PAGES, error::StorageError},
    utils::mock::create_temp_db_path_with_prefix,
};

#[test]
fn test_open_creates_missing_file() {
    let path = create_temp_db_path_with_prefix("pager_create");
    let pager = Pager::open(&path).unwrap();
    assert_eq!(pager.file_length(), 0);
    assert!(path.exists());
    drop(pager);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_fresh_page_is_zero_filled() {
    let path = create_temp_db_path_with_prefix("pager_zero");
    let mut pager = Pager::open(&path).unwrap();

    let page = pager.get_page(0).unwrap();
    assert_eq!(page.len(), PAGE_SIZE);
    assert!(page.iter().all(|&b| b == 0));

    drop(pager);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_cache_hit_returns_previous_writes() {
    let path = create_temp_db_path_with_prefix("pager_hit");
    let mut pager = Pager::open(&path).unwrap();

    {
        let page = pager.get_page(3).unwrap();
        page[0..5].copy_from_slice(b"hello");
    }
    {
        let page = pager.get_page(3).unwrap();
        assert_eq!(&page[0..5], b"hello");
    }

    drop(pager);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_get_page_out_of_bounds() {
    let path = create_temp_db_path_with_prefix("pager_oob");
    let mut pager = Pager::open(&path).unwrap();

    let err = pager.get_page(TABLE_MAX_PAGES).unwrap_err();
    assert!(matches!(err, StorageError::PageOutOfBounds { .. }));

    drop(pager);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_flush_uncached_page_is_an_error() {
    let path = create_temp_db_path_with_prefix("pager_flush_uncached");
    let mut pager = Pager::open(&path).unwrap();

    let err = pager.flush(0, PAGE_SIZE).unwrap_err();
    assert!(matches!(err, StorageError::PageNotCached { page_num: 0 }));

    drop(pager);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_flush_rejects_oversized_byte_count() {
    let path = create_temp_db_path_with_prefix("pager_flush_oversized");
    let mut pager = Pager::open(&path).unwrap();

    pager.get_page(0).unwrap();
    let err = pager.flush(0, PAGE_SIZE + 1).unwrap_err();
    assert!(matches!(
        err,
        StorageError::FlushTooLarge {
            page_num: 0,
            byte_count,
            page_size: PAGE_SIZE,
        } if byte_count == PAGE_SIZE + 1
    ));

    drop(pager);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_flush_then_reload_from_disk() {
    let path = create_temp_db_path_with_prefix("pager_reload");

    {
        let mut pager = Pager::open(&path).unwrap();
        let page = pager.get_page(0).unwrap();
        page[100..106].copy_from_slice(b"world!");
        pager.flush(0, PAGE_SIZE).unwrap();
        pager.sync().unwrap();
    }

    {
        let mut pager = Pager::open(&path).unwrap();
        assert_eq!(pager.file_length(), PAGE_SIZE as u64);
        let page = pager.get_page(0).unwrap();
        assert_eq!(&page[100..106], b"world!");
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn test_partial_flush_writes_exact_byte_count() {
    let path = create_temp_db_path_with_prefix("pager_partial");

    {
        let mut pager = Pager::open(&path).unwrap();
        let page = pager.get_page(0).unwrap();
        page.fill(0xAB);
        pager.flush(0, 300).unwrap();
        pager.sync().unwrap();
    }

    assert_eq!(fs::metadata(&path).unwrap().len(), 300);

    // The trailing partial page loads back with its 300 on-disk bytes and a
    // zero tail.
    {
        let mut pager = Pager::open(&path).unwrap();
        let page = pager.get_page(0).unwrap();
        assert!(page[..300].iter().all(|&b| b == 0xAB));
        assert!(page[300..].iter().all(|&b| b == 0));
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn test_page_beyond_file_end_loads_zeroed() {
    let path = create_temp_db_path_with_prefix("pager_beyond_eof");

    {
        let mut pager = Pager::open(&path).unwrap();
        let page = pager.get_page(0).unwrap();
        page.fill(0xCD);
        pager.flush(0, PAGE_SIZE).unwrap();
        pager.sync().unwrap();
    }

    {
        let mut pager = Pager::open(&path).unwrap();
        let page = pager.get_page(7).unwrap();
        assert!(page.iter().all(|&b| b == 0));
    }

    let _ = fs::remove_file(&path);
}

#[test]
fn test_is_cached_tracks_materialized_slots() {
    let path = create_temp_db_path_with_prefix("pager_cached");
    let mut pager = Pager::open(&path).unwrap();

    assert!(!pager.is_cached(0));
    pager.get_page(0).unwrap();
    assert!(pager.is_cached(0));
    assert!(!pager.is_cached(1));

    drop(pager);
    let _ = fs::remove_file(&path);
}

use crate::utils::random_records;
use kommundata::{KommunError, Paginator, paginate};

/// Concatenating every page gives back the list, nothing dropped or repeated
#[test]
fn test_pages_reconstruct_the_list() -> kommundata::Result<()> {
    for (seed, len) in [(1, 0), (2, 1), (3, 14), (4, 15), (5, 16), (6, 290)] {
        let records = random_records(seed, len);
        for page_size in [1, 7, 15, 100] {
            let paginator = Paginator::new(page_size)?;
            let total_pages = paginator.total_pages(records.len());
            assert_eq!(total_pages, len.div_ceil(page_size));

            let rebuilt: Vec<_> = (1..=total_pages)
                .flat_map(|page| paginate(&records, page_size, page).unwrap_or_default())
                .collect();
            assert_eq!(rebuilt, records, "len {len}, page size {page_size}");
        }
    }
    Ok(())
}

/// Pages past the end and page 0 are empty
#[test]
fn test_out_of_range_pages_are_empty() -> kommundata::Result<()> {
    let records = random_records(7, 40);
    assert!(paginate(&records, 15, 4)?.is_empty());
    assert!(paginate(&records, 15, 0)?.is_empty());
    assert_eq!(paginate(&records, 15, 3)?.len(), 10);
    Ok(())
}

/// A zero page size is rejected instead of dividing by zero
#[test]
fn test_zero_page_size() {
    assert!(matches!(Paginator::new(0), Err(KommunError::InvalidPageSize)));
    assert!(matches!(paginate(&[1, 2, 3], 0, 1), Err(KommunError::InvalidPageSize)));
}

/// A page past the end still reports the list's size
#[test]
fn test_page_view_past_the_end() {
    let items: Vec<u32> = (0..31).collect();
    let page = Paginator::default().page(&items, 9);
    assert!(page.is_empty());
    assert_eq!(page.number, 9);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.total_items, 31);
    assert!(page.has_previous());
    assert!(!page.has_next());
}

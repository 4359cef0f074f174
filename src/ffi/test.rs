use super::bindings::PERF_ATTR_SIZE_VER8;
use super::Attr;

#[test]
fn test_attr_size() {
    assert_eq!(size_of::<Attr>(), PERF_ATTR_SIZE_VER8 as usize);
}

#[test]
fn test_bitfield() {
    let mut attr = Attr::default();
    attr.set_exclude_kernel(1);
    attr.set_exclude_hv(1);
    assert_eq!(attr._bitfield_1, (1 << 5) | (1 << 6));
    assert_eq!(attr.exclude_user(), 0);

    attr.set_exclude_kernel(0);
    assert_eq!(attr.exclude_kernel(), 0);
    assert_eq!(attr.exclude_hv(), 1);
}

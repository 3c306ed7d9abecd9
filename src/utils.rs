/// maps a possibly out of bounds index onto a ring of `len` cells.
pub fn wrap(index: isize, len: usize) -> usize {
    let len = len as isize;
    (((index % len) + len) % len) as usize
}

#[test]
fn test_wrap() {
    assert_eq!(wrap(0, 10), 0);
    assert_eq!(wrap(1, 10), 1);
    assert_eq!(wrap(-1, 10), 9);
    assert_eq!(wrap(10, 10), 0);
    assert_eq!(wrap(11, 10), 1);
    assert_eq!(wrap(-11, 10), 9);
}

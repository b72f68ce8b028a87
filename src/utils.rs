//! Machine-word helpers shared by the coefficient domains.

pub fn gcd_unsigned(mut a: u64, mut b: u64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        a = b % a;
        b = c;
    }
    b
}

pub fn gcd_signed(mut a: i64, mut b: i64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i64::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

/// Compute `a^e mod m` for machine words.
pub fn pow_mod_u64(mut a: u64, mut e: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }

    let mut r: u128 = 1;
    let mut b = (a % m) as u128;
    while e > 0 {
        if e & 1 == 1 {
            r = r * b % m as u128;
        }
        b = b * b % m as u128;
        e >>= 1;
    }
    a = r as u64;
    a
}

/// Deterministic Miller-Rabin test for 64-bit integers.
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }

    for p in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        if n % p == 0 {
            return n == p;
        }
    }

    let mut d = n - 1;
    let mut s = 0;
    while d % 2 == 0 {
        d /= 2;
        s += 1;
    }

    'witness: for a in [2u64, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37] {
        let mut x = pow_mod_u64(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }

        for _ in 1..s {
            x = ((x as u128 * x as u128) % n as u128) as u64;
            if x == n - 1 {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

#[cfg(test)]
mod test {
    #[test]
    fn gcd() {
        assert_eq!(super::gcd_unsigned(12, 18), 6);
        assert_eq!(super::gcd_signed(-12, 18), 6);
        assert_eq!(super::gcd_signed(i64::MIN, -1), 1);
    }

    #[test]
    fn primality() {
        assert!(super::is_prime_u64(4293491017));
        assert!(super::is_prime_u64(18446744073709551557));
        assert!(!super::is_prime_u64(561));
        assert!(super::is_prime_u64(2));
        assert!(!super::is_prime_u64(1));
    }
}

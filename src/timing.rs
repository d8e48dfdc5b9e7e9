use std::fmt;
use std::time::{Duration, Instant};

/// Snapshot taken before and after running a child process.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    wall: Instant,
    cpu: Option<CpuTimes>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CpuTimes {
    user: Duration,
    system: Duration,
}

/// Time spent by one solution run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Elapsed {
    Cpu { user: Duration, system: Duration },
    Wall(Duration),
}

impl Clock {
    pub fn now() -> Self {
        Self {
            wall: Instant::now(),
            cpu: children_cpu_times(),
        }
    }

    pub fn elapsed_since(&self, start: &Clock) -> Elapsed {
        match (start.cpu, self.cpu) {
            (Some(before), Some(after)) => Elapsed::Cpu {
                user: after.user.saturating_sub(before.user),
                system: after.system.saturating_sub(before.system),
            },
            _ => Elapsed::Wall(self.wall.saturating_duration_since(start.wall)),
        }
    }
}

/// Accumulated CPU time of all waited-for children of this process.
#[cfg(unix)]
fn children_cpu_times() -> Option<CpuTimes> {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: getrusage only writes into the provided struct.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_CHILDREN, usage.as_mut_ptr()) };
    if rc != 0 {
        return None;
    }
    // SAFETY: initialised by the successful call above.
    let usage = unsafe { usage.assume_init() };
    let to_duration = |tv: libc::timeval| {
        Duration::from_secs(tv.tv_sec.max(0) as u64) + Duration::from_micros(tv.tv_usec.max(0) as u64)
    };
    Some(CpuTimes {
        user: to_duration(usage.ru_utime),
        system: to_duration(usage.ru_stime),
    })
}

#[cfg(not(unix))]
fn children_cpu_times() -> Option<CpuTimes> {
    None
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elapsed::Cpu { user, system } => write!(
                f,
                "Time elapsed: user: {}, sys: {}, total: {}",
                human_time(*user),
                human_time(*system),
                human_time(*user + *system)
            ),
            Elapsed::Wall(wall) => write!(f, "Time elapsed: {}", human_time(*wall)),
        }
    }
}

/// `1d 3h 46m 40s` from a minute up, otherwise three significant digits in s/ms/µs/ns.
pub fn human_time(span: Duration) -> String {
    let secs = span.as_secs_f64();

    if secs >= 60.0 {
        let units = [("d", 86_400u64), ("h", 3_600), ("m", 60), ("s", 1)];
        let mut left = span.as_secs();
        let mut parts = Vec::new();
        for (suffix, length) in units {
            let value = left / length;
            if value > 0 {
                left %= length;
                parts.push(format!("{}{}", value, suffix));
            }
            if left == 0 {
                break;
            }
        }
        return parts.join(" ");
    }

    let units = ["s", "ms", "µs", "ns"];
    let scale = [1.0, 1e3, 1e6, 1e9];
    let order = if secs > 0.0 {
        let magnitude = secs.log10().floor() as i32;
        (-magnitude.div_euclid(3)).clamp(0, 3) as usize
    } else {
        3
    };

    format!("{} {}", significant(secs * scale[order], 3), units[order])
}

/// Mirrors printf's `%.Ng`: N significant digits, trailing zeros dropped.
fn significant(value: f64, digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0) as usize;
    let mut out = format!("{:.*}", decimals, value);
    if out.contains('.') {
        out = out.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format() {
        assert_eq!(human_time(Duration::from_secs(100_000)), "1d 3h 46m 40s");
        assert_eq!(human_time(Duration::from_secs(60)), "1m");
        assert_eq!(human_time(Duration::from_secs(3_725)), "1h 2m 5s");
    }

    #[test]
    fn test_short_spans() {
        assert_eq!(human_time(Duration::from_millis(1500)), "1.5 s");
        assert_eq!(human_time(Duration::from_millis(50)), "50 ms");
        assert_eq!(human_time(Duration::from_micros(12_345)), "12.3 ms");
        assert_eq!(human_time(Duration::from_micros(250)), "250 µs");
        assert_eq!(human_time(Duration::from_nanos(42)), "42 ns");
        assert_eq!(human_time(Duration::ZERO), "0 ns");
    }

    #[test]
    fn test_elapsed_display() {
        let cpu = Elapsed::Cpu {
            user: Duration::from_millis(20),
            system: Duration::from_millis(5),
        };
        assert_eq!(
            cpu.to_string(),
            "Time elapsed: user: 20 ms, sys: 5 ms, total: 25 ms"
        );
        assert_eq!(
            Elapsed::Wall(Duration::from_secs(2)).to_string(),
            "Time elapsed: 2 s"
        );
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let start = Clock::now();
        let end = Clock::now();
        match end.elapsed_since(&start) {
            Elapsed::Cpu { user, system } => assert!(user + system < Duration::from_secs(1)),
            Elapsed::Wall(wall) => assert!(wall < Duration::from_secs(1)),
        }
    }
}

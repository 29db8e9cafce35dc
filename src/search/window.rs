use super::INFINITY;

/// The `[alpha, beta]` bounds a node is searched with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    pub alpha: i32,
    pub beta: i32,
}

impl SearchWindow {
    pub const fn new(alpha: i32, beta: i32) -> Self {
        Self { alpha, beta }
    }

    pub const fn full() -> Self {
        Self::new(-INFINITY, INFINITY)
    }

    /// The window as seen by the opponent in a negamax recursion.
    pub const fn negate_and_swap(self) -> Self {
        Self::new(-self.beta, -self.alpha)
    }

    /// Zero-width probe just above alpha.
    pub const fn null_window(self) -> Self {
        Self::new(self.alpha, self.alpha + 1)
    }

    pub const fn is_null(&self) -> bool {
        self.beta - self.alpha <= 1
    }

    pub const fn contains(&self, value: i32) -> bool {
        self.alpha < value && value < self.beta
    }
}

impl Default for SearchWindow {
    fn default() -> Self {
        Self::full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negate_and_swap() {
        let window = SearchWindow::new(-3, 10);
        assert_eq!(window.negate_and_swap(), SearchWindow::new(-10, 3));
        assert_eq!(window.negate_and_swap().negate_and_swap(), window);
    }

    #[test]
    fn test_null_window() {
        let probe = SearchWindow::new(5, 100).null_window();
        assert_eq!(probe, SearchWindow::new(5, 6));
        assert!(probe.is_null());
        assert!(!SearchWindow::full().is_null());
        assert!(!probe.contains(5));
        assert!(SearchWindow::full().contains(0));
    }
}

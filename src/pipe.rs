pub(crate) struct Pipe<T> {
    pub(crate) iter: Box<dyn Iterator<Item = T>>,
}

impl<T> Iterator for Pipe<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

impl<T: 'static> Pipe<T> {
    pub(crate) fn op_map(self, f: impl FnMut(T) -> T + 'static) -> Pipe<T> {
        Pipe { iter: Box::new(self.map(f)) }
    }

    pub(crate) fn op_filter(self, f: impl FnMut(&T) -> bool + 'static) -> Pipe<T> {
        Pipe { iter: Box::new(self.filter(f)) }
    }

    pub(crate) fn op_inspect(self, f: impl FnMut(&T) + 'static) -> Pipe<T> {
        Pipe { iter: Box::new(self.inspect(f)) }
    }
}

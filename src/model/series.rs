/// One 5-minute OHLC sample as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct IntradayPoint {
    pub timestamp: String,
    /// Not every provider entry carries an open; nothing derives from it.
    pub open: Option<f64>,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesOrder {
    /// Newest point first, the order the provider sends.
    ReverseChronological,
    /// Oldest point first, the order charts are drawn in.
    Chronological,
}

/// Ordered intraday points. The order is tracked explicitly so a series can be
/// flipped for display and flipped back without losing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    points: Vec<IntradayPoint>,
    order: SeriesOrder,
}

impl Series {
    pub fn reverse_chronological(points: Vec<IntradayPoint>) -> Self {
        Self {
            points,
            order: SeriesOrder::ReverseChronological,
        }
    }

    pub fn chronological(points: Vec<IntradayPoint>) -> Self {
        Self {
            points,
            order: SeriesOrder::Chronological,
        }
    }

    pub fn order(&self) -> SeriesOrder {
        self.order
    }

    pub fn points(&self) -> &[IntradayPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Oldest retrieved point, regardless of storage order.
    pub fn oldest(&self) -> Option<&IntradayPoint> {
        match self.order {
            SeriesOrder::ReverseChronological => self.points.last(),
            SeriesOrder::Chronological => self.points.first(),
        }
    }

    pub fn newest(&self) -> Option<&IntradayPoint> {
        match self.order {
            SeriesOrder::ReverseChronological => self.points.first(),
            SeriesOrder::Chronological => self.points.last(),
        }
    }

    /// Iterate oldest to newest.
    pub fn iter_chronological(&self) -> Box<dyn Iterator<Item = &IntradayPoint> + '_> {
        match self.order {
            SeriesOrder::ReverseChronological => Box::new(self.points.iter().rev()),
            SeriesOrder::Chronological => Box::new(self.points.iter()),
        }
    }

    pub fn into_chronological(self) -> Series {
        match self.order {
            SeriesOrder::Chronological => self,
            SeriesOrder::ReverseChronological => self.reversed(),
        }
    }

    pub fn into_reverse_chronological(self) -> Series {
        match self.order {
            SeriesOrder::ReverseChronological => self,
            SeriesOrder::Chronological => self.reversed(),
        }
    }

    fn reversed(mut self) -> Series {
        self.points.reverse();
        self.order = match self.order {
            SeriesOrder::Chronological => SeriesOrder::ReverseChronological,
            SeriesOrder::ReverseChronological => SeriesOrder::Chronological,
        };
        self
    }

    pub fn highs(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }
}

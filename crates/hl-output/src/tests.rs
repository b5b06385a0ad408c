//! Integration tests for hl-output.

use hl_core::{BoxId, DroneId, HarvestConfig, Location, SimTime, WorkerId};
use hl_logistics::{Courier, HarvestBox};
use tempfile::TempDir;

use crate::{DeliveryRow, OutputWriter, SnapshotRow};

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn t(x: f64) -> SimTime {
    SimTime::new(x).unwrap()
}

fn snap_row(time: f64, queue_length: u64, delivered_count: u64) -> SnapshotRow {
    SnapshotRow { time, queue_length, delivered_count }
}

fn delivery_row() -> DeliveryRow {
    let delivered = HarvestBox::new(BoxId(4), WorkerId(2), t(79.0)).deliver(t(87.0), Courier::Drone(DroneId(1)));
    DeliveryRow::from(&delivered)
}

fn read_csv(path: &std::path::Path) -> (Vec<String>, Vec<csv::StringRecord>) {
    let mut rdr = csv::Reader::from_path(path).unwrap();
    let headers = rdr.headers().unwrap().iter().map(str::to_owned).collect();
    let rows = rdr.records().map(|r| r.unwrap()).collect();
    (headers, rows)
}

#[cfg(test)]
mod rows {
    use super::*;

    #[test]
    fn delivery_row_flattens_courier() {
        let row = delivery_row();
        assert_eq!(row.box_id, 4);
        assert_eq!(row.creator, 2);
        assert_eq!(row.created_at, 79.0);
        assert_eq!(row.delivered_at, 87.0);
        assert_eq!(row.courier, "drone");
        assert_eq!(row.courier_id, 1);
    }
}

#[cfg(test)]
mod csv_tests {
    use super::*;
    use crate::CsvWriter;

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let (headers, rows) = read_csv(&dir.path().join("snapshots.csv"));
        assert_eq!(headers, ["time", "queue_length", "delivered_count"]);
        assert!(rows.is_empty());

        let (headers, _) = read_csv(&dir.path().join("deliveries.csv"));
        assert_eq!(headers, ["box_id", "creator", "created_at", "delivered_at", "courier", "courier_id"]);
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshot(&snap_row(44.5, 2, 1)).unwrap();
        w.write_delivery(&delivery_row()).unwrap();
        w.finish().unwrap();

        let (_, rows) = read_csv(&dir.path().join("snapshots.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "44.5");
        assert_eq!(&rows[0][1], "2");
        assert_eq!(&rows[0][2], "1");

        let (_, rows) = read_csv(&dir.path().join("deliveries.csv"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["4", "2", "79", "87", "drone", "1"]);
    }

    #[test]
    fn csv_finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod jsonl_tests {
    use hl_sim::Frame;
    use serde_json::Value;

    use super::*;
    use crate::JsonLinesWriter;

    fn lines(buf: &[u8]) -> Vec<Value> {
        std::str::from_utf8(buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn records_tagged_by_kind() {
        let mut w = JsonLinesWriter::new(Vec::new());
        w.write_snapshot(&snap_row(22.0, 0, 1)).unwrap();
        w.write_delivery(&delivery_row()).unwrap();
        w.finish().unwrap();

        let out = lines(&w.into_inner());
        assert_eq!(out.len(), 2);
        assert_eq!(out[0]["kind"], "snapshot");
        assert_eq!(out[0]["time"], 22.0);
        assert_eq!(out[0]["delivered_count"], 1);
        assert_eq!(out[1]["kind"], "delivery");
        assert_eq!(out[1]["courier"], "drone");
        assert_eq!(out[1]["courier_id"], 1);
    }

    #[test]
    fn frame_shape() {
        let frame = Frame {
            time:              0.5,
            workers:           vec![Location::new(2.0, 2.0)],
            drones:            vec![Location::new(11.0, 6.0), Location::new(18.0, 6.0)],
            collection_points: vec![Location::new(18.0, 6.0)],
        };
        let mut w = JsonLinesWriter::new(Vec::new());
        w.write_frame(&frame).unwrap();

        let out = lines(&w.into_inner());
        assert_eq!(
            out[0],
            serde_json::json!({
                "kind": "frame",
                "time": 0.5,
                "workers": [{"x": 2.0, "y": 2.0}],
                "drones": [{"x": 11.0, "y": 6.0}, {"x": 18.0, "y": 6.0}],
                "collection_points": [{"x": 18.0, "y": 6.0}],
            })
        );
    }

    #[test]
    fn create_writes_a_file() {
        let dir = tmp();
        let path = dir.path().join("trace.jsonl");
        let mut w = JsonLinesWriter::create(&path).unwrap();
        w.write_snapshot(&snap_row(0.0, 0, 0)).unwrap();
        w.finish().unwrap();
        drop(w);

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}

#[cfg(test)]
mod observer_tests {
    use hl_sim::{SimBuilder, SimObserver, Snapshot};

    use super::*;
    use crate::{CsvWriter, JsonLinesWriter, OutputError, OutputResult, SimOutputObserver};

    fn scenario() -> HarvestConfig {
        HarvestConfig { num_workers: 1, num_drones: 1, fatigue_threshold: 3, ..HarvestConfig::default() }
    }

    #[test]
    fn snapshots_written_only_on_change() {
        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let mut sim = SimBuilder::new(scenario()).build().unwrap();
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let (_, rows) = read_csv(&dir.path().join("snapshots.csv"));
        let rows: Vec<Vec<&str>> = rows.iter().map(|r| r.iter().collect()).collect();
        assert_eq!(
            rows,
            vec![
                vec!["0", "0", "0"],
                vec!["22", "0", "1"],
                vec!["44.5", "0", "2"],
                vec!["60", "0", "2"],
            ]
        );

        let (_, rows) = read_csv(&dir.path().join("deliveries.csv"));
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][3], "44.5");
        assert_eq!(&rows[1][4], "worker");
    }

    #[test]
    fn frames_reach_the_json_writer() {
        let mut obs = SimOutputObserver::new(JsonLinesWriter::new(Vec::new()));
        let mut sim = SimBuilder::new(scenario()).frame_interval(10.0).build().unwrap();
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let buf = obs.into_writer().into_inner();
        let kinds: Vec<String> = std::str::from_utf8(&buf)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["kind"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(kinds.iter().filter(|k| *k == "frame").count(), 7);
        assert_eq!(kinds.iter().filter(|k| *k == "delivery").count(), 2);
        assert_eq!(kinds.last().map(String::as_str), Some("snapshot"));
    }

    struct FailingWriter {
        calls: usize,
    }

    impl OutputWriter for FailingWriter {
        fn write_snapshot(&mut self, _row: &SnapshotRow) -> OutputResult<()> {
            self.calls += 1;
            Err(OutputError::Io(std::io::Error::other(format!("disk full ({})", self.calls))))
        }

        fn write_delivery(&mut self, _row: &DeliveryRow) -> OutputResult<()> {
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_kept_and_taken_once() {
        let mut obs = SimOutputObserver::new(FailingWriter { calls: 0 });
        obs.on_step_end(&Snapshot { time: 0.0, queue_length: 0, delivered_count: 0 });
        obs.on_step_end(&Snapshot { time: 1.0, queue_length: 1, delivered_count: 0 });

        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk full (1)"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.into_writer().calls, 2);
    }
}

use egui::{Color32, Vec2};
use sketch_board::{Board, BoardResult, ExportSink, ExportedImage, Point};

#[derive(Default)]
struct MemorySink {
    delivered: Vec<ExportedImage>,
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, export: ExportedImage) -> BoardResult<()> {
        self.delivered.push(export);
        Ok(())
    }
}

fn drawn_board(density: f32) -> Board {
    let mut board = Board::new();
    board.resize(Vec2::new(60.0, 40.0), density);
    board.set_background_color(Color32::from_rgb(10, 20, 30));
    board.tool_mut().set_color(Color32::RED);
    board.tool_mut().set_width(8.0);
    board.pointer_down(Point::at(10.0, 20.0));
    board.pointer_move(Point::at(30.0, 20.0));
    board.pointer_move(Point::at(50.0, 20.0));
    board.pointer_up();
    board
}

#[test]
fn test_export_uses_logical_size_on_dense_display() {
    let board = drawn_board(2.0);
    let frame = board.frame().unwrap();
    assert_eq!((frame.width(), frame.height()), (120, 80));

    let export = board.export().unwrap();
    assert_eq!((export.width, export.height), (60, 40));
    assert_eq!(export.file_name, "drawing.png");

    let decoded = image::load_from_memory(&export.png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (60, 40));
    assert_eq!(decoded.get_pixel(30, 20).0, [255, 0, 0, 255]);
    assert_eq!(decoded.get_pixel(30, 5).0, [10, 20, 30, 255]);
}

#[test]
fn test_export_is_independent_of_live_density() {
    let low = drawn_board(1.0).export().unwrap();
    let high = drawn_board(3.0).export().unwrap();
    assert_eq!(low.png, high.png);
}

#[test]
fn test_export_name_follows_background() {
    let mut board = drawn_board(1.0);

    let mut png = Vec::new();
    image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 200, 0, 255]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    let notice = board.upload("holiday/beach.png", "image/png", &png).unwrap();
    assert!(notice.contains("beach.png"));

    let mut sink = MemorySink::default();
    board.export_to(&mut sink).unwrap();
    assert_eq!(sink.delivered.len(), 1);
    assert_eq!(sink.delivered[0].file_name, "updated-beach.png");

    assert!(board.remove_background());
    assert!(!board.remove_background());
    assert_eq!(board.export().unwrap().file_name, "drawing.png");
}
